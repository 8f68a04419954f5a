//! Swipe database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for swipes table
#[derive(Debug, Clone, FromRow)]
pub struct SwipeModel {
    pub swipe_id: i64,
    pub swiper_id: i64,
    pub swiped_id: i64,
    pub direction: String,
    pub created_at: DateTime<Utc>,
}

/// Swipe joined with the counterpart user
#[derive(Debug, Clone, FromRow)]
pub struct SwipeSummaryModel {
    pub swipe_id: i64,
    pub user_id: i64,
    pub name: String,
    pub avatar_url: Option<String>,
    pub direction: String,
    pub created_at: DateTime<Utc>,
}
