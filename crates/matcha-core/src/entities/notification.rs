//! Notification entity

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::value_objects::{NotificationId, NotificationKind, UserId};

/// Persisted notification; only `is_read` changes after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: UserId,
    pub kind: NotificationKind,
    pub content: String,
    pub related_user_id: Option<UserId>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Notification about to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub user_id: UserId,
    pub kind: NotificationKind,
    pub content: String,
    pub related_user_id: Option<UserId>,
}

impl NewNotification {
    pub fn new(user_id: UserId, kind: NotificationKind, content: impl Into<String>) -> Self {
        Self {
            user_id,
            kind,
            content: content.into(),
            related_user_id: None,
        }
    }

    pub fn related_to(mut self, user: UserId) -> Self {
        self.related_user_id = Some(user);
        self
    }
}

/// Total and unread counters for a recipient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NotificationCounts {
    pub total: i64,
    pub unread: i64,
}
