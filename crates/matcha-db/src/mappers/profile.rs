//! Profile, preferences and candidate mappers

use matcha_core::entities::{Candidate, Preferences, Profile};
use matcha_core::error::DomainError;
use matcha_core::value_objects::UserId;

use crate::models::{CandidateModel, PreferencesModel, ProfileModel};

impl From<ProfileModel> for Profile {
    fn from(model: ProfileModel) -> Self {
        Profile {
            user_id: UserId::new(model.user_id),
            bio: model.bio,
            age: model.age,
            gender: model.gender,
            sexual_pref: model.sexual_pref,
            location: model.location,
            latitude: model.latitude,
            longitude: model.longitude,
            avatar_url: model.avatar_url,
            photos: [
                model.photo1_url,
                model.photo2_url,
                model.photo3_url,
                model.photo4_url,
                model.photo5_url,
            ],
        }
    }
}

impl TryFrom<PreferencesModel> for Preferences {
    type Error = DomainError;

    fn try_from(model: PreferencesModel) -> Result<Self, Self::Error> {
        Ok(Preferences {
            user_id: UserId::new(model.user_id),
            preferred_gender: model.preferred_gender.parse()?,
            age_min: model.age_min,
            age_max: model.age_max,
            max_distance_km: model.max_distance_km,
        })
    }
}

impl From<CandidateModel> for Candidate {
    fn from(model: CandidateModel) -> Self {
        Candidate {
            user_id: UserId::new(model.user_id),
            name: model.name,
            fame_rating: model.fame_rating,
            age: model.age,
            bio: model.bio,
            gender: model.gender,
            avatar_url: model.avatar_url,
            latitude: model.latitude,
            longitude: model.longitude,
            created_at: model.created_at,
            common_tags: model.common_tags,
        }
    }
}
