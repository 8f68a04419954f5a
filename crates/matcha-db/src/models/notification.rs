//! Notification database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for notifications table (`type` is selected as `kind`)
#[derive(Debug, Clone, FromRow)]
pub struct NotificationModel {
    pub notification_id: i64,
    pub user_id: i64,
    pub kind: String,
    pub content: String,
    pub related_user_id: Option<i64>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, FromRow)]
pub struct NotificationCountsModel {
    pub total: i64,
    pub unread: i64,
}
