//! # matcha-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `matcha-core`. It handles:
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations, including the transactional swipe path
//!
//! ## Usage
//!
//! ```rust,ignore
//! use matcha_db::{create_pool, run_migrations, PoolConfig};
//! use matcha_db::repositories::PgSwipeRepository;
//!
//! async fn example(url: &str) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::new(url)).await?;
//!     run_migrations(&pool).await?;
//!     let swipes = PgSwipeRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, ping, run_migrations, PgPool, PoolConfig};
pub use repositories::{
    PgBlockRepository, PgChatRepository, PgMatchRepository, PgMessageRepository,
    PgNotificationRepository, PgProfileRepository, PgReportRepository, PgSwipeRepository,
    PgTagRepository, PgTokenRepository, PgUserRepository, PgViewRepository,
};
