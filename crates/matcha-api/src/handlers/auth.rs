//! Authentication handlers
//!
//! Endpoints for login, logout and the current user.

use axum::{extract::State, Json};
use matcha_service::dto::{LoginRequest, LoginResponse, MessageResponse, UserResponse};
use matcha_service::AuthService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Exchange credentials for a bearer token
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// Revoke the presented token
///
/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<MessageResponse>> {
    let service = AuthService::new(state.service_context());
    service.logout(&auth.token).await?;
    Ok(Json(MessageResponse::new("Successfully logged out")))
}

/// GET /auth/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<UserResponse>> {
    let service = AuthService::new(state.service_context());
    Ok(Json(service.me(auth.user_id).await?))
}
