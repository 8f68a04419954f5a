//! Tag models

use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct TagModel {
    pub tag_id: i64,
    pub name: String,
}

/// Row returned by the popularity ranking
#[derive(Debug, Clone, FromRow)]
pub struct TagUsageModel {
    pub tag_id: i64,
    pub name: String,
    pub usage_count: i64,
}
