//! Chat message entity

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::value_objects::{ChatId, MessageId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub id: MessageId,
    pub chat_id: ChatId,
    pub sender_id: UserId,
    pub content: String,
    pub sent_at: DateTime<Utc>,
    pub is_read: bool,
}

impl Message {
    /// Maximum message length in characters
    pub const MAX_CONTENT_LENGTH: usize = 2000;
}
