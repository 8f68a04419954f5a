//! Swipe mappers

use matcha_core::entities::{Swipe, SwipeSummary};
use matcha_core::error::DomainError;
use matcha_core::value_objects::{SwipeId, UserId};

use crate::models::{SwipeModel, SwipeSummaryModel};

impl TryFrom<SwipeModel> for Swipe {
    type Error = DomainError;

    fn try_from(model: SwipeModel) -> Result<Self, Self::Error> {
        Ok(Swipe {
            id: SwipeId::new(model.swipe_id),
            swiper_id: UserId::new(model.swiper_id),
            swiped_id: UserId::new(model.swiped_id),
            direction: model.direction.parse()?,
            created_at: model.created_at,
        })
    }
}

impl TryFrom<SwipeSummaryModel> for SwipeSummary {
    type Error = DomainError;

    fn try_from(model: SwipeSummaryModel) -> Result<Self, Self::Error> {
        Ok(SwipeSummary {
            swipe_id: SwipeId::new(model.swipe_id),
            user_id: UserId::new(model.user_id),
            name: model.name,
            avatar_url: model.avatar_url,
            direction: model.direction.parse()?,
            created_at: model.created_at,
        })
    }
}
