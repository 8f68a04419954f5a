//! Profile view, block and report models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ProfileViewModel {
    pub view_id: i64,
    pub viewer_id: i64,
    pub viewed_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct BlockModel {
    pub block_id: i64,
    pub blocker_id: i64,
    pub blocked_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ReportModel {
    pub report_id: i64,
    pub reporter_id: i64,
    pub reported_id: i64,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}
