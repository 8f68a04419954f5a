//! JSON frames exchanged on the realtime channels

use chrono::{DateTime, Utc};
use matcha_core::entities::{Message, Notification};
use matcha_core::value_objects::{ChatId, MessageId, NotificationId, NotificationKind, UserId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A serialized outbound frame, shared by every connection it is queued on
pub type Frame = Arc<str>;

/// Broadcast on `/ws/chat/{chat_id}` for every accepted message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatFrame {
    pub message_id: MessageId,
    pub chat_id: ChatId,
    pub sender_id: UserId,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

impl From<&Message> for ChatFrame {
    fn from(m: &Message) -> Self {
        Self {
            message_id: m.id,
            chat_id: m.chat_id,
            sender_id: m.sender_id,
            content: m.content.clone(),
            sent_at: m.sent_at,
        }
    }
}

/// Pushed on `/ws/notifications/{user_id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationFrame {
    pub notification_id: NotificationId,
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub content: String,
    pub related_user_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

impl From<&Notification> for NotificationFrame {
    fn from(n: &Notification) -> Self {
        Self {
            notification_id: n.id,
            user_id: n.user_id,
            kind: n.kind,
            content: n.content.clone(),
            related_user_id: n.related_user_id,
            created_at: n.created_at,
        }
    }
}

/// Inbound frame on a chat channel
#[derive(Debug, Clone, Deserialize)]
pub struct ChatInbound {
    pub sender_id: UserId,
    pub content: String,
}

impl ChatInbound {
    pub const EXPECTED: &'static str = "Invalid payload. Expected {sender_id, content}";
}

/// Inbound frame on a notification channel
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationInbound {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub content: String,
}

impl NotificationInbound {
    pub const EXPECTED: &'static str = "Invalid payload. Expected {type, content}";

    /// Decode a frame, treating blank content as a malformed payload
    pub fn parse(text: &str) -> Result<Self, ErrorFrame> {
        let frame: Self = decode(text, Self::EXPECTED)?;
        if frame.content.trim().is_empty() {
            return Err(ErrorFrame::new(Self::EXPECTED));
        }
        Ok(frame)
    }
}

/// Sent to the originating connection only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorFrame {
    pub error: String,
}

impl ErrorFrame {
    pub const INVALID_JSON: &'static str = "Invalid JSON";

    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    pub fn to_frame(&self) -> Frame {
        encode(self).unwrap_or_else(|| Frame::from(r#"{"error":"Internal error"}"#))
    }
}

/// Serialize a frame once for fan-out
pub fn encode<T: Serialize>(value: &T) -> Option<Frame> {
    match serde_json::to_string(value) {
        Ok(json) => Some(Frame::from(json)),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to encode frame");
            None
        }
    }
}

/// Parse inbound text, distinguishing broken JSON from a wrong shape
pub fn decode<T: DeserializeOwned>(text: &str, expected: &str) -> Result<T, ErrorFrame> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|_| ErrorFrame::new(ErrorFrame::INVALID_JSON))?;
    serde_json::from_value(value).map_err(|_| ErrorFrame::new(expected))
}
