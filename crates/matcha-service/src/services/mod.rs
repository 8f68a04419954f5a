//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] and orchestrates
//! repository calls, validation and realtime delivery for one area.

pub mod auth;
pub mod chat;
pub mod context;
pub mod error;
pub mod matching;
pub mod message;
pub mod notification;
pub mod profile;
pub mod safety;
pub mod status;
pub mod swipe;
pub mod tag;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

// Re-export all services for convenience
pub use auth::AuthService;
pub use chat::ChatService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use matching::MatchService;
pub use message::MessageService;
pub use notification::NotificationService;
pub use profile::ProfileService;
pub use safety::{BlockService, ReportService, ViewService};
pub use status::StatusService;
pub use swipe::SwipeService;
pub use tag::TagService;
pub use user::UserService;
