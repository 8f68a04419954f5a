//! Profile, preference and discovery models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for profiles table
#[derive(Debug, Clone, FromRow)]
pub struct ProfileModel {
    pub user_id: i64,
    pub bio: Option<String>,
    pub age: i32,
    pub gender: String,
    pub sexual_pref: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub avatar_url: String,
    pub photo1_url: Option<String>,
    pub photo2_url: Option<String>,
    pub photo3_url: Option<String>,
    pub photo4_url: Option<String>,
    pub photo5_url: Option<String>,
}

/// Database model for preferences table
#[derive(Debug, Clone, FromRow)]
pub struct PreferencesModel {
    pub user_id: i64,
    pub preferred_gender: String,
    pub age_min: i32,
    pub age_max: i32,
    pub max_distance_km: i32,
}

/// Row returned by the discovery candidate query
#[derive(Debug, Clone, FromRow)]
pub struct CandidateModel {
    pub user_id: i64,
    pub name: String,
    pub fame_rating: i32,
    pub age: i32,
    pub bio: Option<String>,
    pub gender: String,
    pub avatar_url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    pub common_tags: Vec<String>,
}
