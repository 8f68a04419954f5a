//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and, where they carry free-form
//! input, `Validate`.

use matcha_core::value_objects::{
    ChatId, NotificationKind, PreferredGender, SwipeDirection, TagId, UserId,
};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// User & Auth Requests
// ============================================================================

/// Account creation request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 3, max = 30, message = "Username must be 3-30 characters"))]
    pub username: Option<String>,

    pub password: String,
}

/// Partial account update; absent fields stay unchanged
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

/// Ordering of user search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchSort {
    /// Youngest first
    Age,
    /// Closest first
    Distance,
    /// Most famous first
    #[default]
    FameRating,
}

/// `GET /users/search` query; `tags` may repeat
#[derive(Debug, Clone, Deserialize)]
pub struct SearchUsersQuery {
    pub current_user_id: UserId,
    pub age_min: Option<i32>,
    pub age_max: Option<i32>,
    pub fame_min: Option<i32>,
    pub fame_max: Option<i32>,
    pub max_distance_km: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub sort_by: SearchSort,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

// ============================================================================
// Profile Requests
// ============================================================================

/// Create or replace a profile
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertProfileRequest {
    #[validate(length(max = 1000, message = "Bio must be at most 1000 characters"))]
    pub bio: Option<String>,

    #[validate(range(min = 18, max = 100, message = "Age must be between 18 and 100"))]
    pub age: i32,

    #[validate(length(min = 1, max = 20, message = "Gender must be 1-20 characters"))]
    pub gender: String,

    #[validate(length(min = 1, max = 20, message = "Sexual preference must be 1-20 characters"))]
    pub sexual_pref: String,

    #[validate(length(max = 255, message = "Location must be at most 255 characters"))]
    pub location: Option<String>,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: Option<f64>,

    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub longitude: Option<f64>,

    #[validate(length(min = 1, message = "Avatar URL is required"))]
    pub avatar_url: String,

    pub photo1_url: Option<String>,
    pub photo2_url: Option<String>,
    pub photo3_url: Option<String>,
    pub photo4_url: Option<String>,
    pub photo5_url: Option<String>,
}

/// Discovery preferences
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PreferencesRequest {
    #[serde(default)]
    pub preferred_gender: PreferredGender,

    #[validate(range(min = 18, max = 100, message = "Minimum age must be between 18 and 100"))]
    pub age_min: i32,

    #[validate(range(min = 18, max = 100, message = "Maximum age must be between 18 and 100"))]
    pub age_max: i32,

    #[validate(range(min = 1, max = 20000, message = "Distance must be between 1 and 20000 km"))]
    pub max_distance_km: i32,
}

/// Optional discovery narrowing; `tags` may repeat
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscoverQuery {
    #[serde(default)]
    pub tags: Vec<String>,
}

// ============================================================================
// Tag & Status Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTagRequest {
    #[validate(length(min = 1, max = 50, message = "Tag name must be 1-50 characters"))]
    pub name: String,
}

/// Attach or detach a tag
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct TagAssignmentRequest {
    pub user_id: UserId,
    pub tag_id: TagId,
}

#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct StatusUpdateRequest {
    pub is_online: bool,
}

/// `GET /status/batch?user_ids=1,2,3`
#[derive(Debug, Clone, Deserialize)]
pub struct BatchStatusQuery {
    pub user_ids: String,
}

// ============================================================================
// Swipe / Message / Notification Requests
// ============================================================================

/// Swipe on another user
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct SwipeRequest {
    pub swiper_id: UserId,
    pub swiped_id: UserId,
    pub direction: SwipeDirection,
}

/// Send a chat message
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageRequest {
    pub chat_id: ChatId,
    pub sender_id: UserId,

    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    pub content: String,
}

/// Create a notification directly (system messages)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNotificationRequest {
    pub user_id: UserId,

    #[serde(rename = "type")]
    pub kind: NotificationKind,

    #[validate(length(min = 1, max = 500, message = "Content must be 1-500 characters"))]
    pub content: String,

    pub related_user_id: Option<UserId>,
}

// ============================================================================
// View / Block / Report Requests
// ============================================================================

#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct RecordViewRequest {
    pub viewer_id: UserId,
    pub viewed_id: UserId,
}

#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct BlockRequest {
    pub blocker_id: UserId,
    pub blocked_id: UserId,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReportRequest {
    pub reporter_id: UserId,
    pub reported_id: UserId,

    #[validate(length(max = 500, message = "Reason must be at most 500 characters"))]
    pub reason: Option<String>,
}
