//! Repository implementations

mod error;
mod fame;
mod matching;
mod message;
mod notification;
mod profile;
mod safety;
mod swipe;
mod tag;
mod user;

pub use error::{map_db_error, map_foreign_key_violation, map_unique_violation};
pub use matching::{PgChatRepository, PgMatchRepository};
pub use message::PgMessageRepository;
pub use notification::PgNotificationRepository;
pub use profile::PgProfileRepository;
pub use safety::{PgBlockRepository, PgReportRepository, PgViewRepository};
pub use swipe::PgSwipeRepository;
pub use tag::PgTagRepository;
pub use user::{PgTokenRepository, PgUserRepository};
