//! Profile views, blocks and reports

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::value_objects::{BlockId, ReportId, UserId, ViewId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileView {
    pub id: ViewId,
    pub viewer_id: UserId,
    pub viewed_id: UserId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub id: BlockId,
    pub blocker_id: UserId,
    pub blocked_id: UserId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub id: ReportId,
    pub reporter_id: UserId,
    pub reported_id: UserId,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}
