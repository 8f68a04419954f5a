//! Authentication service
//!
//! Password login issuing bearer tokens, logout by revoking the token's
//! `jti`, and token resolution for protected routes.

use matcha_common::{verify_password, AppError};
use matcha_core::value_objects::UserId;
use tracing::{info, instrument, warn};

use crate::dto::{LoginRequest, LoginResponse, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown email");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: account has no password");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if !verify_password(&request.password, &password_hash)? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        let token = self.ctx.jwt_service().issue(user.id)?;
        self.ctx.user_repo().touch_last_login(user.id).await?;

        info!(user_id = %user.id, "User logged in");

        Ok(LoginResponse {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
            user_id: user.id,
        })
    }

    /// Resolve a bearer token to its user, rejecting revoked tokens
    #[instrument(skip_all)]
    pub async fn authenticate(&self, token: &str) -> ServiceResult<UserId> {
        let claims = self.ctx.jwt_service().decode_token(token)?;
        if self.ctx.token_repo().is_revoked(&claims.jti).await? {
            return Err(ServiceError::App(AppError::TokenRevoked));
        }
        Ok(claims.user_id()?)
    }

    /// Revoke the presented token until it would have expired anyway
    #[instrument(skip_all)]
    pub async fn logout(&self, token: &str) -> ServiceResult<()> {
        let claims = self.ctx.jwt_service().decode_token(token)?;
        self.ctx
            .token_repo()
            .revoke(&claims.jti, claims.expires_at())
            .await?;
        info!(user_id = %claims.sub, "User logged out");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn me(&self, user_id: UserId) -> ServiceResult<UserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))?;
        Ok(UserResponse::from(&user))
    }
}
