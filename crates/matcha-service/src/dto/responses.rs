//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Ids serialize
//! as plain integers.

use chrono::{DateTime, Utc};
use matcha_core::value_objects::{
    BlockId, ChatId, MatchId, MessageId, NotificationId, NotificationKind, ReportId,
    SwipeDirection, SwipeId, TagId, UserId, ViewId,
};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Acknowledgement of a bulk update
#[derive(Debug, Clone, Serialize)]
pub struct UpdatedResponse {
    pub message: String,
    pub updated: u64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CountResponse {
    pub count: i64,
}

// ============================================================================
// User & Auth Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CreatedUserResponse {
    pub message: String,
    pub user_id: UserId,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub username: Option<String>,
    pub fame_rating: i32,
    pub is_verified: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user_id: UserId,
}

// ============================================================================
// Profile Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub user_id: UserId,
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
    pub is_complete: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreferencesResponse {
    pub user_id: UserId,
    pub preferred_gender: String,
    pub age_min: i32,
    pub age_max: i32,
    pub max_distance_km: i32,
}

/// A discovery result with its distance from the requester
#[derive(Debug, Clone, Serialize)]
pub struct CandidateResponse {
    pub user_id: UserId,
    pub name: String,
    pub fame_rating: i32,
    pub age: i32,
    pub bio: Option<String>,
    pub gender: String,
    pub avatar_url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_km: f64,
    pub common_tags: Vec<String>,
}

// ============================================================================
// Tag & Status Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TagResponse {
    pub tag_id: TagId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserTagsResponse {
    pub user_id: UserId,
    pub tags: Vec<TagResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagUsageResponse {
    pub tag_id: TagId,
    pub name: String,
    pub usage_count: i64,
}

/// Presence of one user; `last_seen` mirrors the last login stamp
#[derive(Debug, Clone, Serialize)]
pub struct UserStatusResponse {
    pub user_id: UserId,
    pub is_online: bool,
    pub last_seen: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdateResponse {
    pub message: String,
    pub is_online: bool,
    pub last_seen: DateTime<Utc>,
}

// ============================================================================
// Swipe & Match Responses
// ============================================================================

/// Result of `POST /swipes`
#[derive(Debug, Clone, Serialize)]
pub struct SwipeResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_id: Option<MatchId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SwipeSummaryResponse {
    pub swipe_id: SwipeId,
    pub user_id: UserId,
    pub name: String,
    pub avatar_url: Option<String>,
    pub direction: SwipeDirection,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchResponse {
    pub match_id: MatchId,
    pub user1_id: UserId,
    pub user2_id: UserId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MatchStatsResponse {
    pub total: i64,
    pub last_7_days: i64,
    pub last_30_days: i64,
}

// ============================================================================
// Chat & Message Responses
// ============================================================================

/// A chat as seen by one participant
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub chat_id: ChatId,
    pub match_id: MatchId,
    pub other_user_id: UserId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatInfoResponse {
    pub chat_id: ChatId,
    pub match_id: MatchId,
    pub user1_id: UserId,
    pub user2_id: UserId,
    pub message_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticipantsResponse {
    pub chat_id: ChatId,
    pub participants: Vec<UserId>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct UnreadCountResponse {
    pub unread_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessageResponse {
    pub message_id: MessageId,
    pub chat_id: ChatId,
    pub sender_id: UserId,
    pub content: String,
    pub sent_at: DateTime<Utc>,
    pub is_read: bool,
}

// ============================================================================
// Notification Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub notification_id: NotificationId,
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub content: String,
    pub related_user_id: Option<UserId>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct NotificationCountsResponse {
    pub total: i64,
    pub unread: i64,
}

// ============================================================================
// View / Block / Report Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ViewResponse {
    pub view_id: ViewId,
    pub viewer_id: UserId,
    pub viewed_id: UserId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlockResponse {
    pub block_id: BlockId,
    pub blocker_id: UserId,
    pub blocked_id: UserId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct BlockCheckResponse {
    pub blocked: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportResponse {
    pub report_id: ReportId,
    pub reporter_id: UserId,
    pub reported_id: UserId,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
