//! Match handlers

use axum::{extract::State, Json};
use matcha_core::value_objects::{MatchId, UserId};
use matcha_service::dto::{CountResponse, MatchResponse, MatchStatsResponse, MessageResponse};
use matcha_service::MatchService;

use crate::extractors::IdPath;
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /matches/{user_id}
pub async fn list_matches(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<Vec<MatchResponse>>> {
    let service = MatchService::new(state.service_context());
    Ok(Json(service.list(user_id).await?))
}

/// GET /matches/{user_id}/count
pub async fn count_matches(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<CountResponse>> {
    let service = MatchService::new(state.service_context());
    Ok(Json(service.count(user_id).await?))
}

/// GET /matches/{user_id}/stats
pub async fn match_stats(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<MatchStatsResponse>> {
    let service = MatchService::new(state.service_context());
    Ok(Json(service.stats(user_id).await?))
}

/// Undo a match: both likes are retracted and the chat goes with it
///
/// DELETE /matches/{match_id}
pub async fn unmatch(
    State(state): State<AppState>,
    IdPath(match_id): IdPath<MatchId>,
) -> ApiResult<Json<MessageResponse>> {
    let service = MatchService::new(state.service_context());
    service.unmatch(match_id).await?;
    Ok(Json(MessageResponse::new("Match deleted successfully")))
}
