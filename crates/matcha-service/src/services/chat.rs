//! Chat service

use matcha_core::entities::Chat;
use matcha_core::value_objects::{ChatId, UserId};
use tracing::instrument;

use crate::dto::{ChatInfoResponse, ChatResponse, ParticipantsResponse, UnreadCountResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Chat service
pub struct ChatService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChatService<'a> {
    /// Create a new ChatService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn load(&self, chat_id: ChatId) -> ServiceResult<Chat> {
        self.ctx
            .chat_repo()
            .find_by_id(chat_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Chat", chat_id))
    }

    /// Chats of a user, each with the other participant
    #[instrument(skip(self))]
    pub async fn list(&self, user_id: UserId) -> ServiceResult<Vec<ChatResponse>> {
        let chats = self.ctx.chat_repo().find_by_user(user_id).await?;
        Ok(chats
            .into_iter()
            .filter_map(|chat| {
                chat.other_participant(user_id).map(|other| ChatResponse {
                    chat_id: chat.id,
                    match_id: chat.match_id,
                    other_user_id: other,
                    created_at: chat.created_at,
                })
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn info(&self, chat_id: ChatId) -> ServiceResult<ChatInfoResponse> {
        let chat = self.load(chat_id).await?;
        let message_count = self.ctx.message_repo().count_by_chat(chat_id).await?;
        Ok(ChatInfoResponse {
            chat_id: chat.id,
            match_id: chat.match_id,
            user1_id: chat.user1_id,
            user2_id: chat.user2_id,
            message_count,
            created_at: chat.created_at,
        })
    }

    #[instrument(skip(self))]
    pub async fn participants(&self, chat_id: ChatId) -> ServiceResult<ParticipantsResponse> {
        let chat = self.load(chat_id).await?;
        Ok(ParticipantsResponse {
            chat_id: chat.id,
            participants: vec![chat.user1_id, chat.user2_id],
        })
    }

    /// Unread messages addressed to the user across all of their chats
    #[instrument(skip(self))]
    pub async fn unread_count(&self, user_id: UserId) -> ServiceResult<UnreadCountResponse> {
        let unread_count = self.ctx.chat_repo().unread_count(user_id).await?;
        Ok(UnreadCountResponse { unread_count })
    }
}
