//! Match and chat mappers

use matcha_core::entities::{Chat, Match, MatchStats};
use matcha_core::value_objects::{ChatId, MatchId, UserId};

use crate::models::{ChatModel, MatchModel, MatchStatsModel};

impl From<MatchModel> for Match {
    fn from(model: MatchModel) -> Self {
        Match {
            id: MatchId::new(model.match_id),
            user1_id: UserId::new(model.user1_id),
            user2_id: UserId::new(model.user2_id),
            created_at: model.created_at,
        }
    }
}

impl From<ChatModel> for Chat {
    fn from(model: ChatModel) -> Self {
        Chat {
            id: ChatId::new(model.chat_id),
            match_id: MatchId::new(model.match_id),
            user1_id: UserId::new(model.user1_id),
            user2_id: UserId::new(model.user2_id),
            created_at: model.created_at,
        }
    }
}

impl From<MatchStatsModel> for MatchStats {
    fn from(model: MatchStatsModel) -> Self {
        MatchStats {
            total: model.total,
            last_7_days: model.last_7_days,
            last_30_days: model.last_30_days,
        }
    }
}
