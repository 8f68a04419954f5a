//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{
    ChatId, MatchId, MessageId, NotificationId, SwipeId, TagId, UnknownVariant, UserId,
};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Profile not found: {0}")]
    ProfileNotFound(UserId),

    #[error("Swipe not found: {0}")]
    SwipeNotFound(SwipeId),

    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),

    #[error("Chat not found: {0}")]
    ChatNotFound(ChatId),

    #[error("Chat not found or user not authorized")]
    ChatAccessDenied,

    #[error("Message not found: {0}")]
    MessageNotFound(MessageId),

    #[error("Notification not found: {0}")]
    NotificationNotFound(NotificationId),

    #[error("Block not found")]
    BlockNotFound,

    #[error("Tag not found: {0}")]
    TagNotFound(TagId),

    #[error("Tag not assigned to user")]
    TagNotAssigned,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    WeakPassword(String),

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Username already exists")]
    UsernameAlreadyExists,

    #[error("User already blocked")]
    AlreadyBlocked,

    #[error("User already reported")]
    AlreadyReported,

    #[error("Tag already exists")]
    TagAlreadyExists,

    #[error("Tag already assigned to user")]
    TagAlreadyAssigned,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ProfileNotFound(_) => "UNKNOWN_PROFILE",
            Self::SwipeNotFound(_) => "UNKNOWN_SWIPE",
            Self::MatchNotFound(_) => "UNKNOWN_MATCH",
            Self::ChatNotFound(_) | Self::ChatAccessDenied => "UNKNOWN_CHAT",
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",
            Self::NotificationNotFound(_) => "UNKNOWN_NOTIFICATION",
            Self::BlockNotFound => "UNKNOWN_BLOCK",
            Self::TagNotFound(_) => "UNKNOWN_TAG",
            Self::TagNotAssigned => "TAG_NOT_ASSIGNED",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::AlreadyBlocked => "ALREADY_BLOCKED",
            Self::AlreadyReported => "ALREADY_REPORTED",
            Self::TagAlreadyExists => "TAG_ALREADY_EXISTS",
            Self::TagAlreadyAssigned => "TAG_ALREADY_ASSIGNED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::ProfileNotFound(_)
                | Self::SwipeNotFound(_)
                | Self::MatchNotFound(_)
                | Self::ChatNotFound(_)
                | Self::ChatAccessDenied
                | Self::MessageNotFound(_)
                | Self::NotificationNotFound(_)
                | Self::BlockNotFound
                | Self::TagNotFound(_)
                | Self::TagNotAssigned
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::WeakPassword(_) | Self::ContentTooLong { .. }
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists
                | Self::UsernameAlreadyExists
                | Self::AlreadyBlocked
                | Self::AlreadyReported
                | Self::TagAlreadyExists
                | Self::TagAlreadyAssigned
        )
    }

    /// Persistence failures; callers may retry the whole operation
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::DatabaseError(_))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }
}

impl From<UnknownVariant> for DomainError {
    fn from(err: UnknownVariant) -> Self {
        Self::InternalError(format!("corrupt stored value: {err}"))
    }
}
