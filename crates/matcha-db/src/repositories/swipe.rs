//! PostgreSQL implementation of SwipeRepository

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::{debug, instrument};

use matcha_core::entities::{Notification, Swipe, SwipeSummary};
use matcha_core::error::DomainError;
use matcha_core::rules::{plan_notifications, SwipeParty, SwipeResolution};
use matcha_core::traits::{RepoResult, SwipeOutcome, SwipeRepository};
use matcha_core::value_objects::{ChatId, MatchId, MatchPair, SwipeDirection, SwipeId, UserId};

use crate::models::{SwipeModel, SwipeSummaryModel};

use super::error::map_db_error;
use super::fame::refresh_fame;
use super::notification::insert_notification;

/// PostgreSQL implementation of SwipeRepository
#[derive(Clone)]
pub struct PgSwipeRepository {
    pool: PgPool,
}

impl PgSwipeRepository {
    /// Create a new PgSwipeRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn user_name(conn: &mut PgConnection, user_id: UserId) -> RepoResult<String> {
    sqlx::query_scalar::<_, String>("SELECT name FROM users WHERE user_id = $1")
        .bind(user_id.into_inner())
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::UserNotFound(user_id))
}

/// Serialize every swipe on the same unordered pair until commit, so two
/// reciprocal likes cannot both miss each other.
async fn lock_pair(conn: &mut PgConnection, pair: MatchPair) -> RepoResult<()> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
        .bind(format!("pair:{}:{}", pair.low(), pair.high()))
        .execute(&mut *conn)
        .await
        .map_err(map_db_error)?;
    Ok(())
}

/// Insert the canonical match row and its chat. `None` when the pair was
/// already matched.
async fn create_match(
    conn: &mut PgConnection,
    pair: MatchPair,
) -> RepoResult<Option<(MatchId, ChatId)>> {
    let match_id = sqlx::query_scalar::<_, i64>(
        r"
        INSERT INTO matches (user1_id, user2_id)
        VALUES ($1, $2)
        ON CONFLICT (user1_id, user2_id) DO NOTHING
        RETURNING match_id
        ",
    )
    .bind(pair.low().into_inner())
    .bind(pair.high().into_inner())
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_db_error)?;

    let Some(match_id) = match_id else {
        return Ok(None);
    };

    let chat_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO chats (match_id) VALUES ($1) RETURNING chat_id",
    )
    .bind(match_id)
    .fetch_one(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(Some((MatchId::new(match_id), ChatId::new(chat_id))))
}

const SUMMARY_SELECT: &str = r"
    SELECT s.swipe_id, u.user_id, u.name, p.avatar_url, s.direction, s.created_at
    FROM swipes s
";

#[async_trait]
impl SwipeRepository for PgSwipeRepository {
    #[instrument(skip(self), fields(%swiper, %swiped, %direction))]
    async fn apply_swipe(
        &self,
        swiper: UserId,
        swiped: UserId,
        direction: SwipeDirection,
    ) -> RepoResult<SwipeOutcome> {
        let pair = MatchPair::new(swiper, swiped)
            .ok_or_else(|| DomainError::validation("Users cannot swipe on themselves"))?;

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let actor_name = user_name(&mut tx, swiper).await?;
        let target_name = user_name(&mut tx, swiped).await?;

        lock_pair(&mut tx, pair).await?;

        sqlx::query(
            r"
            INSERT INTO swipes (swiper_id, swiped_id, direction)
            VALUES ($1, $2, $3)
            ON CONFLICT (swiper_id, swiped_id)
            DO UPDATE SET direction = EXCLUDED.direction, created_at = NOW()
            ",
        )
        .bind(swiper.into_inner())
        .bind(swiped.into_inner())
        .bind(direction.as_str())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let created = if direction.is_like() {
            let reciprocal = sqlx::query_scalar::<_, bool>(
                r"
                SELECT EXISTS (
                    SELECT 1 FROM swipes
                    WHERE swiper_id = $1 AND swiped_id = $2 AND direction = 'like'
                )
                ",
            )
            .bind(swiped.into_inner())
            .bind(swiper.into_inner())
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;

            if reciprocal {
                create_match(&mut tx, pair).await?
            } else {
                None
            }
        } else {
            None
        };

        let resolution = SwipeResolution::from_observation(direction, created);
        let planned = plan_notifications(
            resolution,
            SwipeParty { id: swiper, name: &actor_name },
            SwipeParty { id: swiped, name: &target_name },
        );

        let mut notifications: Vec<Notification> = Vec::with_capacity(planned.len());
        for notification in &planned {
            notifications.push(insert_notification(&mut tx, notification).await?);
        }

        refresh_fame(&mut tx, swiped).await?;
        if resolution.created_match() {
            refresh_fame(&mut tx, swiper).await?;
        }

        tx.commit().await.map_err(map_db_error)?;

        debug!(?resolution, "swipe recorded");
        Ok(SwipeOutcome {
            resolution,
            notifications,
        })
    }

    #[instrument(skip(self))]
    async fn find(&self, swiper: UserId, swiped: UserId) -> RepoResult<Option<Swipe>> {
        let result = sqlx::query_as::<_, SwipeModel>(
            r"
            SELECT swipe_id, swiper_id, swiped_id, direction, created_at
            FROM swipes
            WHERE swiper_id = $1 AND swiped_id = $2
            ",
        )
        .bind(swiper.into_inner())
        .bind(swiped.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Swipe::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn likes_received(&self, user_id: UserId) -> RepoResult<Vec<SwipeSummary>> {
        let models = sqlx::query_as::<_, SwipeSummaryModel>(&format!(
            r"
            {SUMMARY_SELECT}
            JOIN users u ON u.user_id = s.swiper_id
            LEFT JOIN profiles p ON p.user_id = u.user_id
            WHERE s.swiped_id = $1 AND s.direction = 'like'
            ORDER BY s.created_at DESC
            "
        ))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        models.into_iter().map(SwipeSummary::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn given(&self, user_id: UserId) -> RepoResult<Vec<SwipeSummary>> {
        let models = sqlx::query_as::<_, SwipeSummaryModel>(&format!(
            r"
            {SUMMARY_SELECT}
            JOIN users u ON u.user_id = s.swiped_id
            LEFT JOIN profiles p ON p.user_id = u.user_id
            WHERE s.swiper_id = $1
            ORDER BY s.created_at DESC
            "
        ))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        models.into_iter().map(SwipeSummary::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: SwipeId) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let target = sqlx::query_scalar::<_, i64>(
            "DELETE FROM swipes WHERE swipe_id = $1 RETURNING swiped_id",
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::SwipeNotFound(id))?;

        refresh_fame(&mut tx, UserId::new(target)).await?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}
