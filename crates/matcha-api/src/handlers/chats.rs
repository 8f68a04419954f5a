//! Chat handlers

use axum::{extract::State, Json};
use matcha_core::value_objects::{ChatId, UserId};
use matcha_service::dto::{
    ChatInfoResponse, ChatResponse, ParticipantsResponse, UnreadCountResponse,
};
use matcha_service::ChatService;

use crate::extractors::IdPath;
use crate::response::ApiResult;
use crate::state::AppState;

/// Chats of a user, each with the other participant
///
/// GET /chats/{user_id}
pub async fn list_chats(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<Vec<ChatResponse>>> {
    let service = ChatService::new(state.service_context());
    Ok(Json(service.list(user_id).await?))
}

/// GET /chats/{chat_id}/info
pub async fn chat_info(
    State(state): State<AppState>,
    IdPath(chat_id): IdPath<ChatId>,
) -> ApiResult<Json<ChatInfoResponse>> {
    let service = ChatService::new(state.service_context());
    Ok(Json(service.info(chat_id).await?))
}

/// GET /chats/{chat_id}/participants
pub async fn participants(
    State(state): State<AppState>,
    IdPath(chat_id): IdPath<ChatId>,
) -> ApiResult<Json<ParticipantsResponse>> {
    let service = ChatService::new(state.service_context());
    Ok(Json(service.participants(chat_id).await?))
}

/// GET /chats/{user_id}/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<UnreadCountResponse>> {
    let service = ChatService::new(state.service_context());
    Ok(Json(service.unread_count(user_id).await?))
}
