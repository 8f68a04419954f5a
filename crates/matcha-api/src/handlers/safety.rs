//! Profile view, block and report handlers

use axum::{extract::State, Json};
use matcha_core::value_objects::UserId;
use matcha_service::dto::{
    BlockCheckResponse, BlockRequest, BlockResponse, CountResponse, MessageResponse,
    RecordViewRequest, ReportRequest, ReportResponse, ViewResponse,
};
use matcha_service::{BlockService, ReportService, ViewService};

use crate::extractors::{IdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// POST /views
pub async fn record_view(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RecordViewRequest>,
) -> ApiResult<Created<Json<ViewResponse>>> {
    let service = ViewService::new(state.service_context());
    Ok(Created(Json(service.record(request).await?)))
}

/// GET /views/{user_id}/received
pub async fn views_received(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<Vec<ViewResponse>>> {
    let service = ViewService::new(state.service_context());
    Ok(Json(service.received(user_id).await?))
}

/// GET /views/{user_id}/count
pub async fn count_views(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<CountResponse>> {
    let service = ViewService::new(state.service_context());
    Ok(Json(service.count(user_id).await?))
}

/// POST /blocks
pub async fn block_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<BlockRequest>,
) -> ApiResult<Created<Json<BlockResponse>>> {
    let service = BlockService::new(state.service_context());
    Ok(Created(Json(service.create(request).await?)))
}

/// GET /blocks/{user_id}/blocked
pub async fn blocked_users(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<Vec<BlockResponse>>> {
    let service = BlockService::new(state.service_context());
    Ok(Json(service.list(user_id).await?))
}

/// DELETE /blocks/user/{blocker_id}/{blocked_id}
pub async fn unblock_user(
    State(state): State<AppState>,
    IdPath((blocker, blocked)): IdPath<(UserId, UserId)>,
) -> ApiResult<Json<MessageResponse>> {
    let service = BlockService::new(state.service_context());
    service.delete(blocker, blocked).await?;
    Ok(Json(MessageResponse::new("User unblocked successfully")))
}

/// Whether either user blocked the other
///
/// GET /blocks/check/{a}/{b}
pub async fn check_block(
    State(state): State<AppState>,
    IdPath((a, b)): IdPath<(UserId, UserId)>,
) -> ApiResult<Json<BlockCheckResponse>> {
    let service = BlockService::new(state.service_context());
    Ok(Json(service.check(a, b).await?))
}

/// POST /reports
pub async fn report_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ReportRequest>,
) -> ApiResult<Created<Json<ReportResponse>>> {
    let service = ReportService::new(state.service_context());
    Ok(Created(Json(service.create(request).await?)))
}

/// GET /reports/{user_id}/received
pub async fn reports_received(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<Vec<ReportResponse>>> {
    let service = ReportService::new(state.service_context());
    Ok(Json(service.received(user_id).await?))
}
