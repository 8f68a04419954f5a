//! Online status handlers
//!
//! A user counts as online while their last login is recent; see
//! `matcha_core::rules::presence`.

use axum::{extract::State, Json};
use matcha_core::value_objects::UserId;
use matcha_service::dto::{
    BatchStatusQuery, StatusUpdateRequest, StatusUpdateResponse, UserStatusResponse,
};
use matcha_service::StatusService;

use crate::extractors::{AuthUser, IdPath, QueryParams, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Set the caller's own status
///
/// PUT /status/online
pub async fn set_online(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<StatusUpdateRequest>,
) -> ApiResult<Json<StatusUpdateResponse>> {
    let service = StatusService::new(state.service_context());
    Ok(Json(service.set_online(auth.user_id, request.is_online).await?))
}

/// GET /status/{user_id}
pub async fn get_status(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<UserStatusResponse>> {
    let service = StatusService::new(state.service_context());
    Ok(Json(service.get(user_id).await?))
}

/// GET /status/batch?user_ids=1,2,3
pub async fn batch_status(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<BatchStatusQuery>,
) -> ApiResult<Json<Vec<UserStatusResponse>>> {
    let service = StatusService::new(state.service_context());
    Ok(Json(service.batch(&query.user_ids).await?))
}

/// GET /status/online/users
pub async fn online_users(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<UserStatusResponse>>> {
    let service = StatusService::new(state.service_context());
    Ok(Json(service.online_users().await?))
}
