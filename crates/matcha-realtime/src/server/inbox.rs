//! Inbound frame handling per channel kind

use std::sync::Arc;

use async_trait::async_trait;
use matcha_core::entities::NewNotification;
use matcha_core::value_objects::{ChatId, UserId};
use matcha_service::dto::SendMessageRequest;
use matcha_service::{MessageService, NotificationService, ServiceContext};

use crate::protocol::{decode, ChatInbound, ErrorFrame, NotificationInbound};

/// Handles text frames from a connection.
///
/// Returns the error frame to send back to that connection, if any. Valid
/// frames fan out through the services' publisher.
#[async_trait]
pub trait Inbox: Send + Sync {
    async fn on_text(&self, text: &str) -> Option<ErrorFrame>;
}

/// Messages posted on `/ws/chat/{chat_id}`
pub struct ChatInbox {
    ctx: Arc<ServiceContext>,
    chat_id: ChatId,
}

impl ChatInbox {
    pub fn new(ctx: Arc<ServiceContext>, chat_id: ChatId) -> Self {
        Self { ctx, chat_id }
    }
}

#[async_trait]
impl Inbox for ChatInbox {
    async fn on_text(&self, text: &str) -> Option<ErrorFrame> {
        let frame: ChatInbound = match decode(text, ChatInbound::EXPECTED) {
            Ok(frame) => frame,
            Err(error) => return Some(error),
        };
        let request = SendMessageRequest {
            chat_id: self.chat_id,
            sender_id: frame.sender_id,
            content: frame.content,
        };
        MessageService::new(&self.ctx)
            .send(request)
            .await
            .err()
            .map(|e| ErrorFrame::new(e.to_string()))
    }
}

/// Self-addressed notifications posted on `/ws/notifications/{user_id}`
pub struct NotificationInbox {
    ctx: Arc<ServiceContext>,
    user_id: UserId,
}

impl NotificationInbox {
    pub fn new(ctx: Arc<ServiceContext>, user_id: UserId) -> Self {
        Self { ctx, user_id }
    }
}

#[async_trait]
impl Inbox for NotificationInbox {
    async fn on_text(&self, text: &str) -> Option<ErrorFrame> {
        let frame = match NotificationInbound::parse(text) {
            Ok(frame) => frame,
            Err(error) => return Some(error),
        };
        let notification = NewNotification::new(self.user_id, frame.kind, frame.content);
        NotificationService::new(&self.ctx)
            .notify(&notification)
            .await
            .err()
            .map(|e| ErrorFrame::new(e.to_string()))
    }
}
