//! Message handlers
//!
//! Messages sent here are broadcast on the chat channel exactly like
//! messages arriving over the chat socket.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use matcha_core::value_objects::{ChatId, MessageId, UserId};
use matcha_service::dto::{
    ChatMessageResponse, CountResponse, MessageResponse, SendMessageRequest, UpdatedResponse,
};
use matcha_service::MessageService;
use serde::Deserialize;

use crate::extractors::{IdPath, Pagination, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

const MESSAGE_PAGE: i64 = 50;

/// Query of `read-all`: the reader whose incoming messages get marked
#[derive(Debug, Deserialize)]
pub struct ReaderQuery {
    pub user_id: UserId,
}

/// Send a message to a chat the sender participates in
///
/// POST /messages
pub async fn send_message(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SendMessageRequest>,
) -> ApiResult<Created<Json<ChatMessageResponse>>> {
    let service = MessageService::new(state.service_context());
    let response = service.send(request).await?;
    Ok(Created(Json(response)))
}

/// GET /messages/{chat_id}?limit=50&offset=0
pub async fn list_messages(
    State(state): State<AppState>,
    IdPath(chat_id): IdPath<ChatId>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<ChatMessageResponse>>> {
    let service = MessageService::new(state.service_context());
    let messages = service
        .list(chat_id, pagination.limit_or(MESSAGE_PAGE), pagination.offset)
        .await?;
    Ok(Json(messages))
}

/// PUT /messages/{message_id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    IdPath(message_id): IdPath<MessageId>,
) -> ApiResult<Json<MessageResponse>> {
    let service = MessageService::new(state.service_context());
    service.mark_read(message_id).await?;
    Ok(Json(MessageResponse::new("Message marked as read")))
}

/// PUT /messages/chat/{chat_id}/read-all?user_id=
pub async fn mark_chat_read(
    State(state): State<AppState>,
    IdPath(chat_id): IdPath<ChatId>,
    query: Result<Query<ReaderQuery>, QueryRejection>,
) -> ApiResult<Json<UpdatedResponse>> {
    let Query(reader) = query.map_err(|e| ApiError::invalid_query(e.body_text()))?;
    let service = MessageService::new(state.service_context());
    Ok(Json(service.mark_chat_read(chat_id, reader.user_id).await?))
}

/// DELETE /messages/{message_id}
pub async fn delete_message(
    State(state): State<AppState>,
    IdPath(message_id): IdPath<MessageId>,
) -> ApiResult<Json<MessageResponse>> {
    let service = MessageService::new(state.service_context());
    service.delete(message_id).await?;
    Ok(Json(MessageResponse::new("Message deleted successfully")))
}

/// GET /messages/{chat_id}/count
pub async fn count_messages(
    State(state): State<AppState>,
    IdPath(chat_id): IdPath<ChatId>,
) -> ApiResult<Json<CountResponse>> {
    let service = MessageService::new(state.service_context());
    Ok(Json(service.count(chat_id).await?))
}
