//! Typed identifiers
//!
//! Every table uses a `BIGSERIAL` primary key. Each id gets its own newtype
//! so a chat id can never be passed where a user id is expected (the two
//! realtime registries are keyed by these types).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error when parsing an id from a string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid id format")]
pub struct IdParseError;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            #[inline]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            #[inline]
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<i64>().map(Self).map_err(|_| IdParseError)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifier of a user account
    UserId
);
define_id!(SwipeId);
define_id!(
    /// Identifier of a match (unordered pair of users)
    MatchId
);
define_id!(
    /// Identifier of the chat thread owned by a match
    ChatId
);
define_id!(MessageId);
define_id!(NotificationId);
define_id!(ViewId);
define_id!(BlockId);
define_id!(ReportId);
define_id!(
    /// Identifier of an interest tag
    TagId
);
