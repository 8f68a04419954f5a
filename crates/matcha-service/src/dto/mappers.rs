//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use chrono::{DateTime, Utc};
use matcha_core::entities::{
    Block, Candidate, Match, MatchStats, Message, Notification, NotificationCounts, Preferences,
    Profile, ProfileView, Report, SwipeSummary, Tag, TagUsage, User,
};
use matcha_core::rules::is_online;

use super::requests::{PreferencesRequest, UpsertProfileRequest};
use super::responses::{
    BlockResponse, CandidateResponse, ChatMessageResponse, MatchResponse, MatchStatsResponse,
    NotificationCountsResponse, NotificationResponse, PreferencesResponse, ProfileResponse,
    ReportResponse, SwipeSummaryResponse, TagResponse, TagUsageResponse, UserResponse,
    UserStatusResponse, ViewResponse,
};
use matcha_core::value_objects::UserId;

// ============================================================================
// User & Profile Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            username: user.username.clone(),
            fame_rating: user.fame_rating,
            is_verified: user.is_verified,
            last_login: user.last_login,
            created_at: user.created_at,
        }
    }
}

impl UserStatusResponse {
    /// Presence of `user` as observed at `now`
    pub fn observed(user: &User, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user.id,
            is_online: is_online(user.last_login, now),
            last_seen: user.last_login,
            last_login: user.last_login,
        }
    }
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        let is_complete = profile.is_complete();
        let [photo1_url, photo2_url, photo3_url, photo4_url, photo5_url] = profile.photos;
        Self {
            user_id: profile.user_id,
            bio: profile.bio,
            age: profile.age,
            gender: profile.gender,
            sexual_pref: profile.sexual_pref,
            location: profile.location,
            latitude: profile.latitude,
            longitude: profile.longitude,
            avatar_url: profile.avatar_url,
            photo1_url,
            photo2_url,
            photo3_url,
            photo4_url,
            photo5_url,
            is_complete,
        }
    }
}

impl From<&Preferences> for PreferencesResponse {
    fn from(prefs: &Preferences) -> Self {
        Self {
            user_id: prefs.user_id,
            preferred_gender: prefs.preferred_gender.as_str().to_string(),
            age_min: prefs.age_min,
            age_max: prefs.age_max,
            max_distance_km: prefs.max_distance_km,
        }
    }
}

impl CandidateResponse {
    pub fn new(candidate: Candidate, distance_km: f64) -> Self {
        Self {
            user_id: candidate.user_id,
            name: candidate.name,
            fame_rating: candidate.fame_rating,
            age: candidate.age,
            bio: candidate.bio,
            gender: candidate.gender,
            avatar_url: candidate.avatar_url,
            latitude: candidate.latitude,
            longitude: candidate.longitude,
            distance_km,
            common_tags: candidate.common_tags,
        }
    }
}

impl UpsertProfileRequest {
    /// Profile entity owned by `user_id`
    pub fn into_profile(self, user_id: UserId) -> Profile {
        Profile {
            user_id,
            bio: self.bio,
            age: self.age,
            gender: self.gender,
            sexual_pref: self.sexual_pref,
            location: self.location,
            latitude: self.latitude,
            longitude: self.longitude,
            avatar_url: self.avatar_url,
            photos: [
                self.photo1_url,
                self.photo2_url,
                self.photo3_url,
                self.photo4_url,
                self.photo5_url,
            ],
        }
    }
}

impl PreferencesRequest {
    pub fn into_preferences(self, user_id: UserId) -> Preferences {
        Preferences {
            user_id,
            preferred_gender: self.preferred_gender,
            age_min: self.age_min,
            age_max: self.age_max,
            max_distance_km: self.max_distance_km,
        }
    }
}

// ============================================================================
// Tag Mappers
// ============================================================================

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            tag_id: tag.id,
            name: tag.name,
        }
    }
}

impl From<TagUsage> for TagUsageResponse {
    fn from(usage: TagUsage) -> Self {
        Self {
            tag_id: usage.id,
            name: usage.name,
            usage_count: usage.usage_count,
        }
    }
}

// ============================================================================
// Swipe & Match Mappers
// ============================================================================

impl From<SwipeSummary> for SwipeSummaryResponse {
    fn from(s: SwipeSummary) -> Self {
        Self {
            swipe_id: s.swipe_id,
            user_id: s.user_id,
            name: s.name,
            avatar_url: s.avatar_url,
            direction: s.direction,
            created_at: s.created_at,
        }
    }
}

impl From<&Match> for MatchResponse {
    fn from(m: &Match) -> Self {
        Self {
            match_id: m.id,
            user1_id: m.user1_id,
            user2_id: m.user2_id,
            created_at: m.created_at,
        }
    }
}

impl From<MatchStats> for MatchStatsResponse {
    fn from(stats: MatchStats) -> Self {
        Self {
            total: stats.total,
            last_7_days: stats.last_7_days,
            last_30_days: stats.last_30_days,
        }
    }
}

// ============================================================================
// Message & Notification Mappers
// ============================================================================

impl From<&Message> for ChatMessageResponse {
    fn from(m: &Message) -> Self {
        Self {
            message_id: m.id,
            chat_id: m.chat_id,
            sender_id: m.sender_id,
            content: m.content.clone(),
            sent_at: m.sent_at,
            is_read: m.is_read,
        }
    }
}

impl From<&Notification> for NotificationResponse {
    fn from(n: &Notification) -> Self {
        Self {
            notification_id: n.id,
            user_id: n.user_id,
            kind: n.kind,
            content: n.content.clone(),
            related_user_id: n.related_user_id,
            is_read: n.is_read,
            created_at: n.created_at,
        }
    }
}

impl From<NotificationCounts> for NotificationCountsResponse {
    fn from(c: NotificationCounts) -> Self {
        Self {
            total: c.total,
            unread: c.unread,
        }
    }
}

// ============================================================================
// View / Block / Report Mappers
// ============================================================================

impl From<ProfileView> for ViewResponse {
    fn from(v: ProfileView) -> Self {
        Self {
            view_id: v.id,
            viewer_id: v.viewer_id,
            viewed_id: v.viewed_id,
            created_at: v.created_at,
        }
    }
}

impl From<Block> for BlockResponse {
    fn from(b: Block) -> Self {
        Self {
            block_id: b.id,
            blocker_id: b.blocker_id,
            blocked_id: b.blocked_id,
            created_at: b.created_at,
        }
    }
}

impl From<Report> for ReportResponse {
    fn from(r: Report) -> Self {
        Self {
            report_id: r.id,
            reporter_id: r.reporter_id,
            reported_id: r.reported_id,
            reason: r.reason,
            created_at: r.created_at,
        }
    }
}
