//! Swipe resolution
//!
//! Storage decides *what happened* (was there a reciprocal like, did the
//! match insert create a row); this module decides *who gets told what*.

use serde::Serialize;

use crate::entities::NewNotification;
use crate::value_objects::{ChatId, MatchId, NotificationKind, SwipeDirection, UserId};

/// Outcome of recording one swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SwipeResolution {
    /// A reciprocal like created a new match and its chat
    Matched { match_id: MatchId, chat_id: ChatId },
    /// A like that did not create a new match
    Liked,
    Disliked,
}

impl SwipeResolution {
    /// Decide the resolution from what storage observed.
    ///
    /// `created` is `Some` only when the match insert produced a new row;
    /// a reciprocal like whose match already exists resolves to `Liked`.
    pub fn from_observation(direction: SwipeDirection, created: Option<(MatchId, ChatId)>) -> Self {
        match (direction, created) {
            (SwipeDirection::Dislike, _) => Self::Disliked,
            (SwipeDirection::Like, Some((match_id, chat_id))) => {
                Self::Matched { match_id, chat_id }
            }
            (SwipeDirection::Like, None) => Self::Liked,
        }
    }

    pub fn match_id(&self) -> Option<MatchId> {
        match self {
            Self::Matched { match_id, .. } => Some(*match_id),
            _ => None,
        }
    }

    #[inline]
    pub fn created_match(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }
}

/// One side of a swipe, with the name used in notification text
#[derive(Debug, Clone, Copy)]
pub struct SwipeParty<'a> {
    pub id: UserId,
    pub name: &'a str,
}

/// Notifications to persist for a resolved swipe
pub fn plan_notifications(
    resolution: SwipeResolution,
    actor: SwipeParty<'_>,
    target: SwipeParty<'_>,
) -> Vec<NewNotification> {
    match resolution {
        SwipeResolution::Matched { .. } => vec![
            NewNotification::new(
                actor.id,
                NotificationKind::Match,
                format!("You have a new match with {}!", target.name),
            )
            .related_to(target.id),
            NewNotification::new(
                target.id,
                NotificationKind::Match,
                format!("You have a new match with {}!", actor.name),
            )
            .related_to(actor.id),
        ],
        SwipeResolution::Liked => vec![NewNotification::new(
            target.id,
            NotificationKind::Like,
            format!("{} liked your profile!", actor.name),
        )
        .related_to(actor.id)],
        SwipeResolution::Disliked => vec![NewNotification::new(
            target.id,
            NotificationKind::Unlike,
            format!("{} unliked your profile", actor.name),
        )
        .related_to(actor.id)],
    }
}
