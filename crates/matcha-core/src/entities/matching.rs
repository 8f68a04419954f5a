//! Match and chat entities

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::value_objects::{ChatId, MatchId, MatchPair, UserId};

/// Durable record that two users liked each other
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    pub id: MatchId,
    pub user1_id: UserId,
    pub user2_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Match {
    pub fn pair(&self) -> Option<MatchPair> {
        MatchPair::new(self.user1_id, self.user2_id)
    }
}

/// Aggregate counters for a user's matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchStats {
    pub total: i64,
    pub last_7_days: i64,
    pub last_30_days: i64,
}

/// Chat thread; exactly one per match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chat {
    pub id: ChatId,
    pub match_id: MatchId,
    pub user1_id: UserId,
    pub user2_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Chat {
    pub fn is_participant(&self, user: UserId) -> bool {
        self.user1_id == user || self.user2_id == user
    }

    pub fn other_participant(&self, user: UserId) -> Option<UserId> {
        if user == self.user1_id {
            Some(self.user2_id)
        } else if user == self.user2_id {
            Some(self.user1_id)
        } else {
            None
        }
    }
}
