//! User handlers
//!
//! Account creation, lookup, update and deletion, plus user search.

use axum::{extract::State, Json};
use matcha_core::value_objects::UserId;
use matcha_service::dto::{
    CandidateResponse, CreateUserRequest, CreatedUserResponse, MessageResponse,
    SearchUsersQuery, UpdateUserRequest, UserResponse,
};
use matcha_service::{ProfileService, UserService};

use crate::extractors::{IdPath, QueryParams, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Create an account
///
/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<Created<Json<CreatedUserResponse>>> {
    let service = UserService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}

/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.get(user_id).await?))
}

/// Change name and/or email
///
/// PUT /users/{user_id}
pub async fn update_user(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<UserId>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.update(user_id, request).await?))
}

/// Delete an account along with everything that references it
///
/// DELETE /users/{user_id}
pub async fn delete_user(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<MessageResponse>> {
    let service = UserService::new(state.service_context());
    service.delete(user_id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}

/// Search with optional bounds; `tags` may repeat
///
/// GET /users/search?current_user_id=1&age_min=20&tags=art&tags=yoga&sort_by=distance
pub async fn search_users(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<SearchUsersQuery>,
) -> ApiResult<Json<Vec<CandidateResponse>>> {
    let service = ProfileService::new(state.service_context());
    Ok(Json(service.search(query).await?))
}

/// GET /users/top-fame/{user_id}
pub async fn top_fame(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<Vec<CandidateResponse>>> {
    let service = ProfileService::new(state.service_context());
    Ok(Json(service.top_fame(user_id).await?))
}
