//! Swipe entity

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::value_objects::{SwipeDirection, SwipeId, UserId};

/// One row per ordered (swiper, swiped) pair; re-swiping overwrites the direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Swipe {
    pub id: SwipeId,
    pub swiper_id: UserId,
    pub swiped_id: UserId,
    pub direction: SwipeDirection,
    pub created_at: DateTime<Utc>,
}

/// A swipe listed together with the counterpart's public info
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwipeSummary {
    pub swipe_id: SwipeId,
    pub user_id: UserId,
    pub name: String,
    pub avatar_url: Option<String>,
    pub direction: SwipeDirection,
    pub created_at: DateTime<Utc>,
}
