//! PostgreSQL implementation of MessageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use matcha_core::entities::Message;
use matcha_core::error::DomainError;
use matcha_core::traits::{MessageRepository, RepoResult};
use matcha_core::value_objects::{ChatId, MessageId, UserId};

use crate::models::MessageModel;

use super::error::{map_db_error, map_foreign_key_violation};

const MESSAGE_COLUMNS: &str = "message_id, chat_id, sender_id, content, sent_at, is_read";

/// PostgreSQL implementation of MessageRepository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Create a new PgMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self, content))]
    async fn create(
        &self,
        chat_id: ChatId,
        sender_id: UserId,
        content: &str,
    ) -> RepoResult<Message> {
        let model = sqlx::query_as::<_, MessageModel>(&format!(
            r"
            INSERT INTO messages (chat_id, sender_id, content)
            VALUES ($1, $2, $3)
            RETURNING {MESSAGE_COLUMNS}
            "
        ))
        .bind(chat_id.into_inner())
        .bind(sender_id.into_inner())
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_foreign_key_violation(e, || DomainError::ChatNotFound(chat_id)))?;

        Ok(model.into())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: MessageId) -> RepoResult<Option<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE message_id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Message::from))
    }

    #[instrument(skip(self))]
    async fn find_by_chat(
        &self,
        chat_id: ChatId,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Message>> {
        let models = sqlx::query_as::<_, MessageModel>(&format!(
            r"
            SELECT {MESSAGE_COLUMNS}
            FROM messages
            WHERE chat_id = $1
            ORDER BY sent_at ASC, message_id ASC
            LIMIT $2 OFFSET $3
            "
        ))
        .bind(chat_id.into_inner())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(Message::from).collect())
    }

    #[instrument(skip(self))]
    async fn mark_read(&self, id: MessageId) -> RepoResult<()> {
        let result = sqlx::query("UPDATE messages SET is_read = TRUE WHERE message_id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MessageNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn mark_chat_read(&self, chat_id: ChatId, reader: UserId) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE messages SET is_read = TRUE
            WHERE chat_id = $1 AND sender_id <> $2 AND is_read = FALSE
            ",
        )
        .bind(chat_id.into_inner())
        .bind(reader.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: MessageId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM messages WHERE message_id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MessageNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count_by_chat(&self, chat_id: ChatId) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM messages WHERE chat_id = $1")
            .bind(chat_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
