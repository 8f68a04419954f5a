//! Profile and discovery preferences

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::value_objects::{PreferredGender, UserId};

/// Public profile of a user (one per user)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub user_id: UserId,
    pub bio: Option<String>,
    pub age: i32,
    pub gender: String,
    pub sexual_pref: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub avatar_url: String,
    pub photos: [Option<String>; 5],
}

impl Profile {
    pub const MIN_AGE: i32 = 18;
    pub const MAX_AGE: i32 = 100;

    /// Avatar, bio and at least one of the first two photos
    pub fn is_complete(&self) -> bool {
        let filled = |s: &Option<String>| s.as_deref().is_some_and(|v| !v.trim().is_empty());
        !self.avatar_url.trim().is_empty()
            && filled(&self.bio)
            && (filled(&self.photos[0]) || filled(&self.photos[1]))
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

/// Discovery preferences of a user
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Preferences {
    pub user_id: UserId,
    pub preferred_gender: PreferredGender,
    pub age_min: i32,
    pub age_max: i32,
    pub max_distance_km: i32,
}

impl Preferences {
    /// Used when the user never saved preferences
    pub fn defaults_for(user_id: UserId) -> Self {
        Self {
            user_id,
            preferred_gender: PreferredGender::Both,
            age_min: 18,
            age_max: 50,
            max_distance_km: 50,
        }
    }
}

/// A discovery candidate as read from storage, before distance filtering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub user_id: UserId,
    pub name: String,
    pub fame_rating: i32,
    pub age: i32,
    pub bio: Option<String>,
    pub gender: String,
    pub avatar_url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    /// Tags the candidate shares with the requester, by name
    pub common_tags: Vec<String>,
}

/// Criteria for an explicit user search
///
/// Unlike discovery, a search does not hide users already swiped or
/// viewed. Blocks in either direction still hide a user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchFilter {
    pub requester: UserId,
    pub age_min: Option<i32>,
    pub age_max: Option<i32>,
    pub fame_min: Option<i32>,
    pub fame_max: Option<i32>,
    pub gender: PreferredGender,
    /// Match users carrying any of these tags; empty means no tag filter
    pub tags: Vec<String>,
}

impl SearchFilter {
    pub fn new(requester: UserId) -> Self {
        Self {
            requester,
            ..Self::default()
        }
    }

    /// Age and gender taken from saved preferences
    pub fn from_preferences(prefs: &Preferences) -> Self {
        Self {
            age_min: Some(prefs.age_min),
            age_max: Some(prefs.age_max),
            gender: prefs.preferred_gender,
            ..Self::new(prefs.user_id)
        }
    }

    pub fn accepts_age(&self, age: i32) -> bool {
        self.age_min.map_or(true, |min| age >= min) && self.age_max.map_or(true, |max| age <= max)
    }

    pub fn accepts_fame(&self, fame: i32) -> bool {
        self.fame_min.map_or(true, |min| fame >= min)
            && self.fame_max.map_or(true, |max| fame <= max)
    }
}
