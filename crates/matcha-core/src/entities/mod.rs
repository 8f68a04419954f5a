//! Domain entities - core business objects

mod matching;
mod message;
mod notification;
mod profile;
mod safety;
mod swipe;
mod tag;
mod user;

pub use matching::{Chat, Match, MatchStats};
pub use message::Message;
pub use notification::{NewNotification, Notification, NotificationCounts};
pub use profile::{Candidate, Preferences, Profile, SearchFilter};
pub use safety::{Block, ProfileView, Report};
pub use swipe::{Swipe, SwipeSummary};
pub use tag::{Tag, TagUsage};
pub use user::{NewUser, User, UserUpdate};
