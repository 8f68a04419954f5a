//! Message service
//!
//! Sending persists the message first, then broadcasts it on the chat's
//! realtime channel and notifies the other participant.

use matcha_core::entities::{Message, NewNotification};
use matcha_core::value_objects::{ChatId, MessageId, NotificationKind, UserId};
use matcha_core::DomainError;
use tracing::{debug, info, instrument, warn};

use crate::dto::{ChatMessageResponse, CountResponse, SendMessageRequest, UpdatedResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::notification::NotificationService;

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Send a message into a chat the sender participates in.
    ///
    /// Used by both `POST /messages` and the chat websocket.
    #[instrument(skip(self, request), fields(chat_id = %request.chat_id, sender_id = %request.sender_id))]
    pub async fn send(&self, request: SendMessageRequest) -> ServiceResult<ChatMessageResponse> {
        let content = request.content.trim();
        if content.is_empty() {
            return Err(DomainError::validation("Message content cannot be empty").into());
        }
        if content.chars().count() > Message::MAX_CONTENT_LENGTH {
            return Err(DomainError::ContentTooLong {
                max: Message::MAX_CONTENT_LENGTH,
            }
            .into());
        }

        let chat = self
            .ctx
            .chat_repo()
            .find_by_id(request.chat_id)
            .await?
            .filter(|chat| chat.is_participant(request.sender_id))
            .ok_or(DomainError::ChatAccessDenied)?;

        let message = self
            .ctx
            .message_repo()
            .create(chat.id, request.sender_id, content)
            .await?;

        let delivered = self.ctx.publisher().publish_message(&message);
        info!(message_id = %message.id, delivered, "Message sent");

        if let Some(recipient) = chat.other_participant(request.sender_id) {
            let notification = NewNotification::new(
                recipient,
                NotificationKind::Message,
                "You have a new message",
            )
            .related_to(request.sender_id);
            // The message is already stored; a failed notification does not undo it.
            if let Err(e) = NotificationService::new(self.ctx).notify(&notification).await {
                warn!(
                    error = %e,
                    recipient_id = %recipient,
                    "Failed to store message notification"
                );
            }
        }

        Ok(ChatMessageResponse::from(&message))
    }

    /// Messages of a chat, oldest first
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        chat_id: ChatId,
        limit: i64,
        offset: i64,
    ) -> ServiceResult<Vec<ChatMessageResponse>> {
        let messages = self
            .ctx
            .message_repo()
            .find_by_chat(chat_id, limit, offset)
            .await?;
        Ok(messages.iter().map(ChatMessageResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn mark_read(&self, message_id: MessageId) -> ServiceResult<()> {
        self.ctx.message_repo().mark_read(message_id).await?;
        Ok(())
    }

    /// Mark every message in the chat not sent by `reader` as read
    #[instrument(skip(self))]
    pub async fn mark_chat_read(
        &self,
        chat_id: ChatId,
        reader: UserId,
    ) -> ServiceResult<UpdatedResponse> {
        self.ctx
            .chat_repo()
            .find_by_id(chat_id)
            .await?
            .filter(|chat| chat.is_participant(reader))
            .ok_or(DomainError::ChatAccessDenied)?;

        let updated = self.ctx.message_repo().mark_chat_read(chat_id, reader).await?;
        debug!(updated, "Chat marked as read");
        Ok(UpdatedResponse {
            message: "Messages marked as read".to_string(),
            updated,
        })
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, message_id: MessageId) -> ServiceResult<()> {
        self.ctx.message_repo().delete(message_id).await?;
        info!(message_id = %message_id, "Message deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn count(&self, chat_id: ChatId) -> ServiceResult<CountResponse> {
        let count = self.ctx.message_repo().count_by_chat(chat_id).await?;
        Ok(CountResponse { count })
    }
}
