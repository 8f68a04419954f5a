//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.
//!
//! Sibling routes share one parameter name per segment (`:id`) where the
//! same position carries different kinds of ids; the handlers' extractors
//! give the parameter its meaning.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{
    auth, chats, health, matches, messages, notifications, profiles, safety, status, swipes, tags,
    users,
};
use crate::state::AppState;

/// Create the API router (health is exported separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(user_routes())
        .merge(auth_routes())
        .merge(profile_routes())
        .merge(swipe_routes())
        .merge(match_routes())
        .merge(chat_routes())
        .merge(message_routes())
        .merge(notification_routes())
        .merge(safety_routes())
        .merge(tag_routes())
        .merge(status_routes())
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::create_user))
        .route("/users/search", get(users::search_users))
        .route("/users/top-fame/:user_id", get(users::top_fame))
        .route(
            "/users/:user_id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
}

/// Profiles, preferences and discovery
fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profiles/discover/:user_id", get(profiles::discover))
        .route(
            "/profiles/:user_id",
            get(profiles::get_profile)
                .put(profiles::upsert_profile)
                .delete(profiles::delete_profile),
        )
        .route(
            "/preferences/:user_id",
            get(profiles::get_preferences).put(profiles::set_preferences),
        )
}

fn swipe_routes() -> Router<AppState> {
    Router::new()
        .route("/swipes", post(swipes::create_swipe))
        .route("/swipes/:id", delete(swipes::delete_swipe))
        .route("/swipes/:id/likes", get(swipes::likes_received))
        .route("/swipes/:id/given", get(swipes::swipes_given))
}

fn match_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/matches/:id",
            get(matches::list_matches).delete(matches::unmatch),
        )
        .route("/matches/:id/count", get(matches::count_matches))
        .route("/matches/:id/stats", get(matches::match_stats))
}

fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/chats/:id", get(chats::list_chats))
        .route("/chats/:id/info", get(chats::chat_info))
        .route("/chats/:id/participants", get(chats::participants))
        .route("/chats/:id/unread-count", get(chats::unread_count))
}

fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/messages", post(messages::send_message))
        .route(
            "/messages/:id",
            get(messages::list_messages).delete(messages::delete_message),
        )
        .route("/messages/:id/read", put(messages::mark_read))
        .route("/messages/:id/count", get(messages::count_messages))
        .route(
            "/messages/chat/:chat_id/read-all",
            put(messages::mark_chat_read),
        )
}

fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", post(notifications::create_notification))
        .route(
            "/notifications/:id",
            get(notifications::list_notifications).delete(notifications::delete_notification),
        )
        .route("/notifications/:id/unread", get(notifications::unread_notifications))
        .route("/notifications/:id/count", get(notifications::count_notifications))
        .route("/notifications/:id/read", put(notifications::mark_read))
        .route("/notifications/:id/read-all", put(notifications::mark_all_read))
        .route(
            "/notifications/:id/all",
            delete(notifications::delete_all_notifications),
        )
}

/// Views, blocks and reports
fn safety_routes() -> Router<AppState> {
    Router::new()
        .route("/views", post(safety::record_view))
        .route("/views/:user_id/received", get(safety::views_received))
        .route("/views/:user_id/count", get(safety::count_views))
        .route("/blocks", post(safety::block_user))
        .route("/blocks/:user_id/blocked", get(safety::blocked_users))
        .route(
            "/blocks/user/:blocker_id/:blocked_id",
            delete(safety::unblock_user),
        )
        .route("/blocks/check/:a/:b", get(safety::check_block))
        .route("/reports", post(safety::report_user))
        .route("/reports/:user_id/received", get(safety::reports_received))
}

fn tag_routes() -> Router<AppState> {
    Router::new()
        .route("/tags", get(tags::list_tags).post(tags::create_tag))
        .route("/tags/popular", get(tags::popular_tags))
        .route("/tags/assign", post(tags::assign_tag))
        .route("/tags/unassign", delete(tags::unassign_tag))
        .route("/tags/user/:user_id", get(tags::user_tags))
        .route("/tags/search/:query", get(tags::search_tags))
        .route("/tags/:tag_id", get(tags::get_tag).delete(tags::delete_tag))
}

/// Presence; the static segments win over `/status/:user_id`
fn status_routes() -> Router<AppState> {
    Router::new()
        .route("/status/online", put(status::set_online))
        .route("/status/online/users", get(status::online_users))
        .route("/status/batch", get(status::batch_status))
        .route("/status/:user_id", get(status::get_status))
}
