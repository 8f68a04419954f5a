//! Match and chat database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for matches table
#[derive(Debug, Clone, FromRow)]
pub struct MatchModel {
    pub match_id: i64,
    pub user1_id: i64,
    pub user2_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Chat row joined with its match to carry both participants
#[derive(Debug, Clone, FromRow)]
pub struct ChatModel {
    pub chat_id: i64,
    pub match_id: i64,
    pub user1_id: i64,
    pub user2_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, FromRow)]
pub struct MatchStatsModel {
    pub total: i64,
    pub last_7_days: i64,
    pub last_30_days: i64,
}
