//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    BatchStatusQuery, BlockRequest, CreateNotificationRequest, CreateTagRequest, CreateUserRequest,
    DiscoverQuery, LoginRequest, PreferencesRequest, RecordViewRequest, ReportRequest,
    SearchSort, SearchUsersQuery, SendMessageRequest, StatusUpdateRequest, SwipeRequest,
    TagAssignmentRequest, UpdateUserRequest, UpsertProfileRequest,
};

pub use responses::{
    BlockCheckResponse, BlockResponse, CandidateResponse, ChatInfoResponse, ChatMessageResponse,
    ChatResponse, CountResponse, CreatedUserResponse, HealthChecks, HealthResponse,
    LoginResponse, MatchResponse, MatchStatsResponse, MessageResponse, NotificationCountsResponse,
    NotificationResponse, ParticipantsResponse, PreferencesResponse, ProfileResponse,
    ReadinessResponse, ReportResponse, StatusUpdateResponse, SwipeResponse, SwipeSummaryResponse,
    TagResponse, TagUsageResponse, UnreadCountResponse, UpdatedResponse, UserResponse,
    UserStatusResponse, UserTagsResponse, ViewResponse,
};
