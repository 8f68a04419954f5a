//! # matcha-core
//!
//! Domain layer containing entities, value objects, matching rules and
//! repository traits. This crate has zero dependencies on infrastructure
//! (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod rules;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Block, Candidate, Chat, Match, MatchStats, Message, NewNotification, NewUser, Notification,
    NotificationCounts, Preferences, Profile, ProfileView, Report, SearchFilter, Swipe,
    SwipeSummary, Tag, TagUsage, User, UserUpdate,
};
pub use error::DomainError;
pub use rules::{
    compute_fame, haversine_km, plan_notifications, FameInputs, SwipeParty, SwipeResolution,
};
pub use traits::{
    BlockRepository, ChatRepository, MatchRepository, MessageRepository, NotificationRepository,
    ProfileRepository, RealtimePublisher, RepoResult, ReportRepository, SwipeOutcome,
    SwipeRepository, TagRepository, TokenRepository, UserRepository, ViewRepository,
};
pub use value_objects::{
    BlockId, ChatId, IdParseError, MatchId, MatchPair, MessageId, NotificationId, NotificationKind,
    PreferredGender, ReportId, SwipeDirection, SwipeId, TagId, UnknownVariant, UserId, ViewId,
};
