//! Realtime routes
//!
//! Mounted into the API server so REST and socket writes share one hub.

mod handler;
mod inbox;
mod session;
mod state;

pub use handler::{chat_socket, notification_socket};
pub use inbox::{ChatInbox, Inbox, NotificationInbox};
pub use state::RealtimeState;

use axum::{routing::get, Router};

/// Create the realtime router
pub fn create_router(state: RealtimeState) -> Router {
    Router::new()
        .route("/ws/chat/:chat_id", get(chat_socket))
        .route("/ws/notifications/:user_id", get(notification_socket))
        .with_state(state)
}
