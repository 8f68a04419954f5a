//! Canonical key of a match

use serde::{Deserialize, Serialize};

use super::UserId;

/// Unordered pair of two distinct users, stored as `(low, high)`.
///
/// Whichever user's like completes the match, both orderings of the
/// same two ids produce an identical pair, so the unique constraint on
/// `(user1_id, user2_id)` sees one row per pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchPair {
    low: UserId,
    high: UserId,
}

impl MatchPair {
    /// Returns `None` when both ids are the same user.
    pub fn new(a: UserId, b: UserId) -> Option<Self> {
        if a == b {
            return None;
        }
        Some(Self {
            low: a.min(b),
            high: a.max(b),
        })
    }

    #[inline]
    pub fn low(&self) -> UserId {
        self.low
    }

    #[inline]
    pub fn high(&self) -> UserId {
        self.high
    }

    pub fn contains(&self, user: UserId) -> bool {
        self.low == user || self.high == user
    }

    /// The other member of the pair, if `user` belongs to it
    pub fn other(&self, user: UserId) -> Option<UserId> {
        if user == self.low {
            Some(self.high)
        } else if user == self.high {
            Some(self.low)
        } else {
            None
        }
    }
}
