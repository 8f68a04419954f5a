//! Database models - SQLx-compatible structs for PostgreSQL tables

mod matching;
mod message;
mod notification;
mod profile;
mod safety;
mod swipe;
mod tag;
mod user;

pub use matching::{ChatModel, MatchModel, MatchStatsModel};
pub use message::MessageModel;
pub use notification::{NotificationCountsModel, NotificationModel};
pub use profile::{CandidateModel, PreferencesModel, ProfileModel};
pub use safety::{BlockModel, ProfileViewModel, ReportModel};
pub use swipe::{SwipeModel, SwipeSummaryModel};
pub use tag::{TagModel, TagUsageModel};
pub use user::UserModel;
