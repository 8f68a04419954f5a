//! PostgreSQL implementation of TagRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use matcha_core::entities::{Tag, TagUsage};
use matcha_core::error::DomainError;
use matcha_core::traits::{RepoResult, TagRepository};
use matcha_core::value_objects::{TagId, UserId};

use crate::models::{TagModel, TagUsageModel};

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of TagRepository
#[derive(Clone)]
pub struct PgTagRepository {
    pool: PgPool,
}

impl PgTagRepository {
    /// Create a new PgTagRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for PgTagRepository {
    #[instrument(skip(self))]
    async fn create(&self, name: &str) -> RepoResult<Tag> {
        let model = sqlx::query_as::<_, TagModel>(
            "INSERT INTO tags (name) VALUES ($1) RETURNING tag_id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, |_| DomainError::TagAlreadyExists))?;

        Ok(model.into())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: TagId) -> RepoResult<Option<Tag>> {
        let result =
            sqlx::query_as::<_, TagModel>("SELECT tag_id, name FROM tags WHERE tag_id = $1")
                .bind(id.into_inner())
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(result.map(Tag::from))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Tag>> {
        let models = sqlx::query_as::<_, TagModel>("SELECT tag_id, name FROM tags ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(models.into_iter().map(Tag::from).collect())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: TagId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM tags WHERE tag_id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::TagNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn assign(&self, user_id: UserId, tag_id: TagId) -> RepoResult<()> {
        sqlx::query("INSERT INTO user_tags (user_id, tag_id) VALUES ($1, $2)")
            .bind(user_id.into_inner())
            .bind(tag_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(|e| match e.as_database_error() {
                Some(db) if db.is_foreign_key_violation() => {
                    match db.constraint() {
                        Some(name) if name.contains("tag_id") => DomainError::TagNotFound(tag_id),
                        _ => DomainError::UserNotFound(user_id),
                    }
                }
                _ => map_unique_violation(e, |_| DomainError::TagAlreadyAssigned),
            })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn unassign(&self, user_id: UserId, tag_id: TagId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM user_tags WHERE user_id = $1 AND tag_id = $2")
            .bind(user_id.into_inner())
            .bind(tag_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::TagNotAssigned);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Vec<Tag>> {
        let models = sqlx::query_as::<_, TagModel>(
            r"
            SELECT t.tag_id, t.name
            FROM tags t
            JOIN user_tags ut ON ut.tag_id = t.tag_id
            WHERE ut.user_id = $1
            ORDER BY t.name
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(Tag::from).collect())
    }

    #[instrument(skip(self))]
    async fn popular(&self, limit: i64) -> RepoResult<Vec<TagUsage>> {
        let models = sqlx::query_as::<_, TagUsageModel>(
            r"
            SELECT t.tag_id, t.name, COUNT(ut.user_id) AS usage_count
            FROM tags t
            LEFT JOIN user_tags ut ON ut.tag_id = t.tag_id
            GROUP BY t.tag_id, t.name
            ORDER BY usage_count DESC, t.name
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(TagUsage::from).collect())
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &str, limit: i64) -> RepoResult<Vec<Tag>> {
        let models = sqlx::query_as::<_, TagModel>(
            r"
            SELECT tag_id, name
            FROM tags
            WHERE name ILIKE '%' || $1 || '%' ESCAPE '\'
            ORDER BY name
            LIMIT $2
            ",
        )
        .bind(escape_like(query))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(Tag::from).collect())
    }
}

/// Make `%`, `_` and `\` match literally inside a LIKE pattern
fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
