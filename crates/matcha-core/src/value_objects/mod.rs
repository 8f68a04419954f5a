//! Value objects - immutable types that represent domain concepts

mod id;
mod kinds;
mod match_pair;

pub use id::{
    BlockId, ChatId, IdParseError, MatchId, MessageId, NotificationId, ReportId, SwipeId, TagId,
    UserId, ViewId,
};
pub use kinds::{NotificationKind, PreferredGender, SwipeDirection, UnknownVariant};
pub use match_pair::MatchPair;
