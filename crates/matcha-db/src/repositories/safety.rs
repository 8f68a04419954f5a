//! PostgreSQL implementations of the view, block and report repositories
//!
//! Each write recomputes the fame of the user on the receiving end in the
//! same transaction.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use matcha_core::entities::{Block, ProfileView, Report};
use matcha_core::error::DomainError;
use matcha_core::traits::{BlockRepository, RepoResult, ReportRepository, ViewRepository};
use matcha_core::value_objects::UserId;

use crate::models::{BlockModel, ProfileViewModel, ReportModel};

use super::error::{map_db_error, map_foreign_key_violation, map_unique_violation};
use super::fame::refresh_fame;

// ============================================================================
// Views
// ============================================================================

/// PostgreSQL implementation of ViewRepository
#[derive(Clone)]
pub struct PgViewRepository {
    pool: PgPool,
}

impl PgViewRepository {
    /// Create a new PgViewRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ViewRepository for PgViewRepository {
    #[instrument(skip(self))]
    async fn record(&self, viewer: UserId, viewed: UserId) -> RepoResult<ProfileView> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let model = sqlx::query_as::<_, ProfileViewModel>(
            r"
            INSERT INTO profile_views (viewer_id, viewed_id)
            VALUES ($1, $2)
            ON CONFLICT (viewer_id, viewed_id) DO UPDATE SET created_at = NOW()
            RETURNING view_id, viewer_id, viewed_id, created_at
            ",
        )
        .bind(viewer.into_inner())
        .bind(viewed.into_inner())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_foreign_key_violation(e, || DomainError::UserNotFound(viewed)))?;

        refresh_fame(&mut tx, viewed).await?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(model.into())
    }

    #[instrument(skip(self))]
    async fn received(&self, user_id: UserId) -> RepoResult<Vec<ProfileView>> {
        let models = sqlx::query_as::<_, ProfileViewModel>(
            r"
            SELECT view_id, viewer_id, viewed_id, created_at
            FROM profile_views
            WHERE viewed_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(ProfileView::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_received(&self, user_id: UserId) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM profile_views WHERE viewed_id = $1")
            .bind(user_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}

// ============================================================================
// Blocks
// ============================================================================

/// PostgreSQL implementation of BlockRepository
#[derive(Clone)]
pub struct PgBlockRepository {
    pool: PgPool,
}

impl PgBlockRepository {
    /// Create a new PgBlockRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlockRepository for PgBlockRepository {
    #[instrument(skip(self))]
    async fn create(&self, blocker: UserId, blocked: UserId) -> RepoResult<Block> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let model = sqlx::query_as::<_, BlockModel>(
            r"
            INSERT INTO blocked_users (blocker_id, blocked_id)
            VALUES ($1, $2)
            RETURNING block_id, blocker_id, blocked_id, created_at
            ",
        )
        .bind(blocker.into_inner())
        .bind(blocked.into_inner())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db) if db.is_foreign_key_violation() => DomainError::UserNotFound(blocked),
            _ => map_unique_violation(e, |_| DomainError::AlreadyBlocked),
        })?;

        refresh_fame(&mut tx, blocked).await?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(model.into())
    }

    #[instrument(skip(self))]
    async fn find_by_blocker(&self, blocker: UserId) -> RepoResult<Vec<Block>> {
        let models = sqlx::query_as::<_, BlockModel>(
            r"
            SELECT block_id, blocker_id, blocked_id, created_at
            FROM blocked_users
            WHERE blocker_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(blocker.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(Block::from).collect())
    }

    #[instrument(skip(self))]
    async fn delete(&self, blocker: UserId, blocked: UserId) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result =
            sqlx::query("DELETE FROM blocked_users WHERE blocker_id = $1 AND blocked_id = $2")
                .bind(blocker.into_inner())
                .bind(blocked.into_inner())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::BlockNotFound);
        }

        refresh_fame(&mut tx, blocked).await?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn exists_between(&self, a: UserId, b: UserId) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS (
                SELECT 1 FROM blocked_users
                WHERE (blocker_id = $1 AND blocked_id = $2)
                   OR (blocker_id = $2 AND blocked_id = $1)
            )
            ",
        )
        .bind(a.into_inner())
        .bind(b.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }
}

// ============================================================================
// Reports
// ============================================================================

/// PostgreSQL implementation of ReportRepository
#[derive(Clone)]
pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    /// Create a new PgReportRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    #[instrument(skip(self, reason))]
    async fn create(
        &self,
        reporter: UserId,
        reported: UserId,
        reason: Option<&str>,
    ) -> RepoResult<Report> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let model = sqlx::query_as::<_, ReportModel>(
            r"
            INSERT INTO reports (reporter_id, reported_id, reason)
            VALUES ($1, $2, $3)
            RETURNING report_id, reporter_id, reported_id, reason, created_at
            ",
        )
        .bind(reporter.into_inner())
        .bind(reported.into_inner())
        .bind(reason)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db) if db.is_foreign_key_violation() => DomainError::UserNotFound(reported),
            _ => map_unique_violation(e, |_| DomainError::AlreadyReported),
        })?;

        refresh_fame(&mut tx, reported).await?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(model.into())
    }

    #[instrument(skip(self))]
    async fn find_received(&self, user_id: UserId) -> RepoResult<Vec<Report>> {
        let models = sqlx::query_as::<_, ReportModel>(
            r"
            SELECT report_id, reporter_id, reported_id, reason, created_at
            FROM reports
            WHERE reported_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(Report::from).collect())
    }
}
