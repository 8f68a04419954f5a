//! Interest tag handlers

use axum::{extract::State, Json};
use matcha_core::value_objects::{TagId, UserId};
use matcha_service::dto::{
    CreateTagRequest, MessageResponse, TagAssignmentRequest, TagResponse, TagUsageResponse,
    UserTagsResponse,
};
use matcha_service::TagService;

use crate::extractors::{IdPath, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

const POPULAR_LIMIT: i64 = 20;
const SEARCH_LIMIT: i64 = 10;

/// POST /tags
pub async fn create_tag(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateTagRequest>,
) -> ApiResult<Created<Json<TagResponse>>> {
    let service = TagService::new(state.service_context());
    Ok(Created(Json(service.create(request).await?)))
}

/// GET /tags
pub async fn list_tags(State(state): State<AppState>) -> ApiResult<Json<Vec<TagResponse>>> {
    let service = TagService::new(state.service_context());
    Ok(Json(service.list().await?))
}

/// GET /tags/{tag_id}
pub async fn get_tag(
    State(state): State<AppState>,
    IdPath(tag_id): IdPath<TagId>,
) -> ApiResult<Json<TagResponse>> {
    let service = TagService::new(state.service_context());
    Ok(Json(service.get(tag_id).await?))
}

/// Delete a tag and every assignment of it
///
/// DELETE /tags/{tag_id}
pub async fn delete_tag(
    State(state): State<AppState>,
    IdPath(tag_id): IdPath<TagId>,
) -> ApiResult<Json<MessageResponse>> {
    let service = TagService::new(state.service_context());
    service.delete(tag_id).await?;
    Ok(Json(MessageResponse::new("Tag deleted successfully")))
}

/// POST /tags/assign
pub async fn assign_tag(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<TagAssignmentRequest>,
) -> ApiResult<Created<Json<MessageResponse>>> {
    let service = TagService::new(state.service_context());
    service.assign(request).await?;
    Ok(Created(Json(MessageResponse::new("Tag assigned successfully"))))
}

/// DELETE /tags/unassign
pub async fn unassign_tag(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<TagAssignmentRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = TagService::new(state.service_context());
    service.unassign(request).await?;
    Ok(Json(MessageResponse::new("Tag unassigned successfully")))
}

/// GET /tags/user/{user_id}
pub async fn user_tags(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<UserTagsResponse>> {
    let service = TagService::new(state.service_context());
    Ok(Json(service.user_tags(user_id).await?))
}

/// Most assigned tags first
///
/// GET /tags/popular?limit=20
pub async fn popular_tags(
    State(state): State<AppState>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<TagUsageResponse>>> {
    let service = TagService::new(state.service_context());
    Ok(Json(service.popular(pagination.limit_or(POPULAR_LIMIT)).await?))
}

/// Case-insensitive substring match on the tag name
///
/// GET /tags/search/{query}?limit=10
pub async fn search_tags(
    State(state): State<AppState>,
    IdPath(query): IdPath<String>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<TagResponse>>> {
    let service = TagService::new(state.service_context());
    Ok(Json(service.search(&query, pagination.limit_or(SEARCH_LIMIT)).await?))
}
