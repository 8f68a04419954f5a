//! Repository traits (ports) - define the interface for data access
//!
//! Writes that feed the fame rating (swipes, matches, views, blocks,
//! reports, profile completion) recompute the affected users' rating in
//! the same transaction as the write itself.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    Block, Candidate, Chat, Match, MatchStats, Message, NewNotification, NewUser, Notification,
    NotificationCounts, Preferences, Profile, ProfileView, Report, SearchFilter, Swipe,
    SwipeSummary, Tag, TagUsage, User, UserUpdate,
};
use crate::error::DomainError;
use crate::rules::SwipeResolution;
use crate::value_objects::{
    ChatId, MatchId, MessageId, NotificationId, SwipeDirection, SwipeId, TagId, UserId,
};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Create a new user; duplicate email/username map to conflict errors
    async fn create(&self, user: &NewUser) -> RepoResult<User>;

    /// Delete a user and everything that references it
    async fn delete(&self, id: UserId) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;

    /// Stamp `last_login` with the current time
    async fn touch_last_login(&self, id: UserId) -> RepoResult<()>;

    /// Apply the fields present in `update`; a taken email maps to
    /// `EmailAlreadyExists`
    async fn update(&self, id: UserId, update: &UserUpdate) -> RepoResult<User>;

    /// Users among `ids` that exist, in id order
    async fn find_many(&self, ids: &[UserId]) -> RepoResult<Vec<User>>;

    /// Users whose `last_login` is at or after `cutoff`, most recent first
    async fn seen_since(&self, cutoff: DateTime<Utc>, limit: i64) -> RepoResult<Vec<User>>;
}

// ============================================================================
// Revoked Token Repository
// ============================================================================

#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Record a token id as revoked until it would have expired anyway
    async fn revoke(&self, jti: &str, expires_at: DateTime<Utc>) -> RepoResult<()>;

    async fn is_revoked(&self, jti: &str) -> RepoResult<bool>;
}

// ============================================================================
// Profile Repository
// ============================================================================

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find(&self, user_id: UserId) -> RepoResult<Option<Profile>>;

    /// Insert or replace the profile and recompute the owner's fame
    async fn upsert(&self, profile: &Profile) -> RepoResult<()>;

    async fn delete(&self, user_id: UserId) -> RepoResult<()>;

    async fn find_preferences(&self, user_id: UserId) -> RepoResult<Option<Preferences>>;

    async fn upsert_preferences(&self, preferences: &Preferences) -> RepoResult<()>;

    /// Profiles with coordinates that pass the age/gender filter, excluding
    /// the user, anyone they swiped or viewed, and blocks in either direction.
    /// A non-empty `tags` keeps only users carrying at least one of them.
    async fn discovery_candidates(
        &self,
        preferences: &Preferences,
        tags: &[String],
    ) -> RepoResult<Vec<Candidate>>;

    /// Profiles with coordinates matching `filter`, excluding the requester
    /// and blocks in either direction
    async fn search_candidates(&self, filter: &SearchFilter) -> RepoResult<Vec<Candidate>>;
}

// ============================================================================
// Tag Repository
// ============================================================================

#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Create a tag; a taken name maps to `TagAlreadyExists`
    async fn create(&self, name: &str) -> RepoResult<Tag>;

    async fn find_by_id(&self, id: TagId) -> RepoResult<Option<Tag>>;

    /// All tags ordered by name
    async fn list(&self) -> RepoResult<Vec<Tag>>;

    /// Delete a tag along with its assignments
    async fn delete(&self, id: TagId) -> RepoResult<()>;

    /// Attach a tag to a user; an existing assignment maps to
    /// `TagAlreadyAssigned`
    async fn assign(&self, user_id: UserId, tag_id: TagId) -> RepoResult<()>;

    async fn unassign(&self, user_id: UserId, tag_id: TagId) -> RepoResult<()>;

    /// Tags of a user ordered by name
    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Vec<Tag>>;

    /// Most used tags first, ties broken by name
    async fn popular(&self, limit: i64) -> RepoResult<Vec<TagUsage>>;

    /// Tags whose name contains `query`, case-insensitively
    async fn search(&self, query: &str, limit: i64) -> RepoResult<Vec<Tag>>;
}

// ============================================================================
// Swipe Repository
// ============================================================================

/// Result of the transactional part of recording a swipe
#[derive(Debug, Clone)]
pub struct SwipeOutcome {
    pub resolution: SwipeResolution,
    /// Notifications persisted in the same transaction
    pub notifications: Vec<Notification>,
}

#[async_trait]
pub trait SwipeRepository: Send + Sync {
    /// Record a swipe in one transaction: upsert the ordered pair, test for
    /// a reciprocal like, create the match and chat when the canonical
    /// insert produced a row, persist the planned notifications, and
    /// recompute fame. Nothing is written if any step fails.
    async fn apply_swipe(
        &self,
        swiper: UserId,
        swiped: UserId,
        direction: SwipeDirection,
    ) -> RepoResult<SwipeOutcome>;

    async fn find(&self, swiper: UserId, swiped: UserId) -> RepoResult<Option<Swipe>>;

    /// Likes received by the user, newest first
    async fn likes_received(&self, user_id: UserId) -> RepoResult<Vec<SwipeSummary>>;

    /// Swipes given by the user, newest first
    async fn given(&self, user_id: UserId) -> RepoResult<Vec<SwipeSummary>>;

    async fn delete(&self, id: SwipeId) -> RepoResult<()>;
}

// ============================================================================
// Match Repository
// ============================================================================

#[async_trait]
pub trait MatchRepository: Send + Sync {
    async fn find_by_id(&self, id: MatchId) -> RepoResult<Option<Match>>;

    /// Matches of a user, newest first
    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Vec<Match>>;

    async fn count_by_user(&self, user_id: UserId) -> RepoResult<i64>;

    async fn stats(&self, user_id: UserId) -> RepoResult<MatchStats>;

    /// Delete the match together with the two like swipes that produced
    /// it; the chat and its messages cascade. Returns the deleted match.
    async fn unmatch(&self, id: MatchId) -> RepoResult<Match>;
}

// ============================================================================
// Chat Repository
// ============================================================================

#[async_trait]
pub trait ChatRepository: Send + Sync {
    async fn find_by_id(&self, id: ChatId) -> RepoResult<Option<Chat>>;

    /// Chats of a user, newest first
    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Vec<Chat>>;

    /// Messages sent to the user and not yet read, across all chats
    async fn unread_count(&self, user_id: UserId) -> RepoResult<i64>;

    async fn delete(&self, id: ChatId) -> RepoResult<()>;
}

// ============================================================================
// Message Repository
// ============================================================================

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn create(&self, chat_id: ChatId, sender_id: UserId, content: &str)
        -> RepoResult<Message>;

    async fn find_by_id(&self, id: MessageId) -> RepoResult<Option<Message>>;

    /// Messages of a chat in send order
    async fn find_by_chat(&self, chat_id: ChatId, limit: i64, offset: i64)
        -> RepoResult<Vec<Message>>;

    async fn mark_read(&self, id: MessageId) -> RepoResult<()>;

    /// Mark every message in the chat not sent by `reader` as read
    async fn mark_chat_read(&self, chat_id: ChatId, reader: UserId) -> RepoResult<u64>;

    async fn delete(&self, id: MessageId) -> RepoResult<()>;

    async fn count_by_chat(&self, chat_id: ChatId) -> RepoResult<i64>;
}

// ============================================================================
// Notification Repository
// ============================================================================

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, notification: &NewNotification) -> RepoResult<Notification>;

    /// Notifications of a user, newest first
    async fn find_by_user(&self, user_id: UserId, limit: i64, offset: i64)
        -> RepoResult<Vec<Notification>>;

    async fn find_unread(&self, user_id: UserId) -> RepoResult<Vec<Notification>>;

    async fn counts(&self, user_id: UserId) -> RepoResult<NotificationCounts>;

    async fn mark_read(&self, id: NotificationId) -> RepoResult<()>;

    async fn mark_all_read(&self, user_id: UserId) -> RepoResult<u64>;

    async fn delete(&self, id: NotificationId) -> RepoResult<()>;

    async fn delete_all(&self, user_id: UserId) -> RepoResult<u64>;
}

// ============================================================================
// View / Block / Report Repositories
// ============================================================================

#[async_trait]
pub trait ViewRepository: Send + Sync {
    /// Record a view and recompute the viewed user's fame
    async fn record(&self, viewer: UserId, viewed: UserId) -> RepoResult<ProfileView>;

    async fn received(&self, user_id: UserId) -> RepoResult<Vec<ProfileView>>;

    async fn count_received(&self, user_id: UserId) -> RepoResult<i64>;
}

#[async_trait]
pub trait BlockRepository: Send + Sync {
    /// Block a user; an existing block maps to `AlreadyBlocked`
    async fn create(&self, blocker: UserId, blocked: UserId) -> RepoResult<Block>;

    async fn find_by_blocker(&self, blocker: UserId) -> RepoResult<Vec<Block>>;

    async fn delete(&self, blocker: UserId, blocked: UserId) -> RepoResult<()>;

    /// Whether either user blocked the other
    async fn exists_between(&self, a: UserId, b: UserId) -> RepoResult<bool>;
}

#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Report a user; an existing report maps to `AlreadyReported`
    async fn create(&self, reporter: UserId, reported: UserId, reason: Option<&str>)
        -> RepoResult<Report>;

    async fn find_received(&self, user_id: UserId) -> RepoResult<Vec<Report>>;
}
