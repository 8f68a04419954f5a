//! PostgreSQL implementations of MatchRepository and ChatRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, instrument};

use matcha_core::entities::{Chat, Match, MatchStats};
use matcha_core::error::DomainError;
use matcha_core::traits::{ChatRepository, MatchRepository, RepoResult};
use matcha_core::value_objects::{ChatId, MatchId, UserId};

use crate::models::{ChatModel, MatchModel, MatchStatsModel};

use super::error::map_db_error;
use super::fame::refresh_fame;

/// PostgreSQL implementation of MatchRepository
#[derive(Clone)]
pub struct PgMatchRepository {
    pool: PgPool,
}

impl PgMatchRepository {
    /// Create a new PgMatchRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchRepository for PgMatchRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: MatchId) -> RepoResult<Option<Match>> {
        let result = sqlx::query_as::<_, MatchModel>(
            "SELECT match_id, user1_id, user2_id, created_at FROM matches WHERE match_id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Match::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Vec<Match>> {
        let models = sqlx::query_as::<_, MatchModel>(
            r"
            SELECT match_id, user1_id, user2_id, created_at
            FROM matches
            WHERE user1_id = $1 OR user2_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(Match::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_by_user(&self, user_id: UserId) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM matches WHERE user1_id = $1 OR user2_id = $1",
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn stats(&self, user_id: UserId) -> RepoResult<MatchStats> {
        let model = sqlx::query_as::<_, MatchStatsModel>(
            r"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE created_at >= NOW() - INTERVAL '7 days') AS last_7_days,
                   COUNT(*) FILTER (WHERE created_at >= NOW() - INTERVAL '30 days') AS last_30_days
            FROM matches
            WHERE user1_id = $1 OR user2_id = $1
            ",
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(model.into())
    }

    #[instrument(skip(self))]
    async fn unmatch(&self, id: MatchId) -> RepoResult<Match> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let model = sqlx::query_as::<_, MatchModel>(
            r"
            DELETE FROM matches
            WHERE match_id = $1
            RETURNING match_id, user1_id, user2_id, created_at
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::MatchNotFound(id))?;

        // Both likes go so either side can start over from nothing
        sqlx::query(
            r"
            DELETE FROM swipes
            WHERE direction = 'like'
              AND ((swiper_id = $1 AND swiped_id = $2) OR (swiper_id = $2 AND swiped_id = $1))
            ",
        )
        .bind(model.user1_id)
        .bind(model.user2_id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let unmatched = Match::from(model);
        refresh_fame(&mut tx, unmatched.user1_id).await?;
        refresh_fame(&mut tx, unmatched.user2_id).await?;

        tx.commit().await.map_err(map_db_error)?;

        info!(match_id = %unmatched.id, "match removed");
        Ok(unmatched)
    }
}

const CHAT_SELECT: &str = r"
    SELECT c.chat_id, c.match_id, m.user1_id, m.user2_id, c.created_at
    FROM chats c
    JOIN matches m ON m.match_id = c.match_id
";

/// PostgreSQL implementation of ChatRepository
#[derive(Clone)]
pub struct PgChatRepository {
    pool: PgPool,
}

impl PgChatRepository {
    /// Create a new PgChatRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatRepository for PgChatRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ChatId) -> RepoResult<Option<Chat>> {
        let result = sqlx::query_as::<_, ChatModel>(&format!(
            "{CHAT_SELECT} WHERE c.chat_id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Chat::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Vec<Chat>> {
        let models = sqlx::query_as::<_, ChatModel>(&format!(
            r"
            {CHAT_SELECT}
            WHERE m.user1_id = $1 OR m.user2_id = $1
            ORDER BY c.created_at DESC
            "
        ))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(Chat::from).collect())
    }

    #[instrument(skip(self))]
    async fn unread_count(&self, user_id: UserId) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM messages msg
            JOIN chats c ON c.chat_id = msg.chat_id
            JOIN matches m ON m.match_id = c.match_id
            WHERE (m.user1_id = $1 OR m.user2_id = $1)
              AND msg.sender_id <> $1
              AND msg.is_read = FALSE
            ",
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ChatId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM chats WHERE chat_id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ChatNotFound(id));
        }

        Ok(())
    }
}
