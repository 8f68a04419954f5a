//! Swipe handlers
//!
//! `POST /swipes` is the entry point of the match engine.

use axum::{extract::State, Json};
use matcha_core::value_objects::{SwipeId, UserId};
use matcha_service::dto::{MessageResponse, SwipeRequest, SwipeResponse, SwipeSummaryResponse};
use matcha_service::SwipeService;

use crate::extractors::{IdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Record a swipe; a reciprocal like answers with the new match id
///
/// POST /swipes
pub async fn create_swipe(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SwipeRequest>,
) -> ApiResult<Json<SwipeResponse>> {
    let service = SwipeService::new(state.service_context());
    Ok(Json(service.record_swipe(request).await?))
}

/// GET /swipes/{user_id}/likes
pub async fn likes_received(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<Vec<SwipeSummaryResponse>>> {
    let service = SwipeService::new(state.service_context());
    Ok(Json(service.likes_received(user_id).await?))
}

/// GET /swipes/{user_id}/given
pub async fn swipes_given(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<Vec<SwipeSummaryResponse>>> {
    let service = SwipeService::new(state.service_context());
    Ok(Json(service.given(user_id).await?))
}

/// DELETE /swipes/{swipe_id}
pub async fn delete_swipe(
    State(state): State<AppState>,
    IdPath(swipe_id): IdPath<SwipeId>,
) -> ApiResult<Json<MessageResponse>> {
    let service = SwipeService::new(state.service_context());
    service.delete(swipe_id).await?;
    Ok(Json(MessageResponse::new("Swipe deleted successfully")))
}
