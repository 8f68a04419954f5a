//! WebSocket upgrade handlers

use axum::{
    extract::{Path, State, WebSocketUpgrade},
    response::IntoResponse,
};
use matcha_core::value_objects::{ChatId, UserId};

use super::inbox::{ChatInbox, NotificationInbox};
use super::session::serve;
use super::state::RealtimeState;

/// `GET /ws/chat/{chat_id}`
pub async fn chat_socket(
    Path(chat_id): Path<ChatId>,
    State(state): State<RealtimeState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| async move {
        let hub = state.hub().clone();
        let inbox = ChatInbox::new(state.service_context().clone(), chat_id);
        serve(hub.chats(), chat_id, socket, hub.settings(), inbox).await;
    })
}

/// `GET /ws/notifications/{user_id}`
pub async fn notification_socket(
    Path(user_id): Path<UserId>,
    State(state): State<RealtimeState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| async move {
        let hub = state.hub().clone();
        let inbox = NotificationInbox::new(state.service_context().clone(), user_id);
        serve(hub.users(), user_id, socket, hub.settings(), inbox).await;
    })
}
