//! PostgreSQL implementation of NotificationRepository

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use matcha_core::entities::{NewNotification, Notification, NotificationCounts};
use matcha_core::error::DomainError;
use matcha_core::traits::{NotificationRepository, RepoResult};
use matcha_core::value_objects::{NotificationId, UserId};

use crate::mappers::notifications_from_models;
use crate::models::{NotificationCountsModel, NotificationModel};

use super::error::{map_db_error, map_foreign_key_violation};

const NOTIFICATION_COLUMNS: &str =
    "notification_id, user_id, type AS kind, content, related_user_id, is_read, created_at";

/// Insert one notification on an existing connection or transaction
pub(crate) async fn insert_notification(
    conn: &mut PgConnection,
    notification: &NewNotification,
) -> RepoResult<Notification> {
    let model = sqlx::query_as::<_, NotificationModel>(&format!(
        r"
        INSERT INTO notifications (user_id, type, content, related_user_id)
        VALUES ($1, $2, $3, $4)
        RETURNING {NOTIFICATION_COLUMNS}
        "
    ))
    .bind(notification.user_id.into_inner())
    .bind(notification.kind.as_str())
    .bind(&notification.content)
    .bind(notification.related_user_id.map(UserId::into_inner))
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| map_foreign_key_violation(e, || DomainError::UserNotFound(notification.user_id)))?;

    Notification::try_from(model)
}

/// PostgreSQL implementation of NotificationRepository
#[derive(Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    /// Create a new PgNotificationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    #[instrument(skip(self, notification), fields(user_id = %notification.user_id, kind = %notification.kind))]
    async fn create(&self, notification: &NewNotification) -> RepoResult<Notification> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        insert_notification(&mut conn, notification).await
    }

    #[instrument(skip(self))]
    async fn find_by_user(
        &self,
        user_id: UserId,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Notification>> {
        let models = sqlx::query_as::<_, NotificationModel>(&format!(
            r"
            SELECT {NOTIFICATION_COLUMNS}
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC, notification_id DESC
            LIMIT $2 OFFSET $3
            "
        ))
        .bind(user_id.into_inner())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        notifications_from_models(models)
    }

    #[instrument(skip(self))]
    async fn find_unread(&self, user_id: UserId) -> RepoResult<Vec<Notification>> {
        let models = sqlx::query_as::<_, NotificationModel>(&format!(
            r"
            SELECT {NOTIFICATION_COLUMNS}
            FROM notifications
            WHERE user_id = $1 AND is_read = FALSE
            ORDER BY created_at DESC, notification_id DESC
            "
        ))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        notifications_from_models(models)
    }

    #[instrument(skip(self))]
    async fn counts(&self, user_id: UserId) -> RepoResult<NotificationCounts> {
        let model = sqlx::query_as::<_, NotificationCountsModel>(
            r"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE is_read = FALSE) AS unread
            FROM notifications
            WHERE user_id = $1
            ",
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(model.into())
    }

    #[instrument(skip(self))]
    async fn mark_read(&self, id: NotificationId) -> RepoResult<()> {
        let result =
            sqlx::query("UPDATE notifications SET is_read = TRUE WHERE notification_id = $1")
                .bind(id.into_inner())
                .execute(&self.pool)
                .await
                .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotificationNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn mark_all_read(&self, user_id: UserId) -> RepoResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: NotificationId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM notifications WHERE notification_id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotificationNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_all(&self, user_id: UserId) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM notifications WHERE user_id = $1")
            .bind(user_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
