//! Notification handlers

use axum::{extract::State, Json};
use matcha_core::value_objects::{NotificationId, UserId};
use matcha_service::dto::{
    CreateNotificationRequest, MessageResponse, NotificationCountsResponse, NotificationResponse,
    UpdatedResponse,
};
use matcha_service::NotificationService;

use crate::extractors::{IdPath, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

const NOTIFICATION_PAGE: i64 = 20;

/// GET /notifications/{user_id}?limit=20&offset=0
pub async fn list_notifications(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<UserId>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<NotificationResponse>>> {
    let service = NotificationService::new(state.service_context());
    let notifications = service
        .list(user_id, pagination.limit_or(NOTIFICATION_PAGE), pagination.offset)
        .await?;
    Ok(Json(notifications))
}

/// GET /notifications/{user_id}/unread
pub async fn unread_notifications(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<Vec<NotificationResponse>>> {
    let service = NotificationService::new(state.service_context());
    Ok(Json(service.unread(user_id).await?))
}

/// GET /notifications/{user_id}/count
pub async fn count_notifications(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<NotificationCountsResponse>> {
    let service = NotificationService::new(state.service_context());
    Ok(Json(service.counts(user_id).await?))
}

/// Create a system notification; it is stored first and then pushed
///
/// POST /notifications
pub async fn create_notification(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateNotificationRequest>,
) -> ApiResult<Created<Json<NotificationResponse>>> {
    let service = NotificationService::new(state.service_context());
    let response = service.create(request).await?;
    Ok(Created(Json(response)))
}

/// PUT /notifications/{notification_id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    IdPath(id): IdPath<NotificationId>,
) -> ApiResult<Json<MessageResponse>> {
    let service = NotificationService::new(state.service_context());
    service.mark_read(id).await?;
    Ok(Json(MessageResponse::new("Notification marked as read")))
}

/// PUT /notifications/{user_id}/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<UpdatedResponse>> {
    let service = NotificationService::new(state.service_context());
    Ok(Json(service.mark_all_read(user_id).await?))
}

/// DELETE /notifications/{notification_id}
pub async fn delete_notification(
    State(state): State<AppState>,
    IdPath(id): IdPath<NotificationId>,
) -> ApiResult<Json<MessageResponse>> {
    let service = NotificationService::new(state.service_context());
    service.delete(id).await?;
    Ok(Json(MessageResponse::new("Notification deleted successfully")))
}

/// DELETE /notifications/{user_id}/all
pub async fn delete_all_notifications(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<UpdatedResponse>> {
    let service = NotificationService::new(state.service_context());
    Ok(Json(service.delete_all(user_id).await?))
}
