//! Profile, preference and discovery handlers

use axum::{extract::State, Json};
use matcha_core::value_objects::UserId;
use matcha_service::dto::{
    CandidateResponse, DiscoverQuery, MessageResponse, PreferencesRequest, PreferencesResponse,
    ProfileResponse, UpsertProfileRequest,
};
use matcha_service::ProfileService;

use crate::extractors::{IdPath, Pagination, QueryParams, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

const DISCOVER_LIMIT: i64 = 10;

/// Create or replace a profile
///
/// PUT /profiles/{user_id}
pub async fn upsert_profile(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<UserId>,
    ValidatedJson(request): ValidatedJson<UpsertProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    let service = ProfileService::new(state.service_context());
    Ok(Json(service.upsert(user_id, request).await?))
}

/// GET /profiles/{user_id}
pub async fn get_profile(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<ProfileResponse>> {
    let service = ProfileService::new(state.service_context());
    Ok(Json(service.get(user_id).await?))
}

/// DELETE /profiles/{user_id}
pub async fn delete_profile(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<MessageResponse>> {
    let service = ProfileService::new(state.service_context());
    service.delete(user_id).await?;
    Ok(Json(MessageResponse::new("Profile deleted successfully")))
}

/// Candidates for the user, best first
///
/// GET /profiles/discover/{user_id}?limit=10&tags=hiking
pub async fn discover(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<UserId>,
    pagination: Pagination,
    QueryParams(query): QueryParams<DiscoverQuery>,
) -> ApiResult<Json<Vec<CandidateResponse>>> {
    let service = ProfileService::new(state.service_context());
    let limit = usize::try_from(pagination.limit_or(DISCOVER_LIMIT)).unwrap_or(1);
    Ok(Json(service.discover(user_id, limit, &query.tags).await?))
}

/// PUT /preferences/{user_id}
pub async fn set_preferences(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<UserId>,
    ValidatedJson(request): ValidatedJson<PreferencesRequest>,
) -> ApiResult<Json<PreferencesResponse>> {
    let service = ProfileService::new(state.service_context());
    Ok(Json(service.set_preferences(user_id, request).await?))
}

/// GET /preferences/{user_id}
pub async fn get_preferences(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<PreferencesResponse>> {
    let service = ProfileService::new(state.service_context());
    Ok(Json(service.get_preferences(user_id).await?))
}
