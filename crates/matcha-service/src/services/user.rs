//! User service
//!
//! Account registration, lookup, update and removal.

use matcha_common::{hash_password, validate_password_strength};
use matcha_core::entities::{NewUser, UserUpdate};
use matcha_core::value_objects::UserId;
use tracing::{info, instrument};

use crate::dto::{CreateUserRequest, CreatedUserResponse, UpdateUserRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new account.
    ///
    /// The password policy is checked before anything is hashed or stored.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: CreateUserRequest) -> ServiceResult<CreatedUserResponse> {
        validate_password_strength(&request.password)?;

        let password_hash = hash_password(&request.password)?;

        let user = self
            .ctx
            .user_repo()
            .create(&NewUser {
                name: request.name,
                email: request.email,
                username: request.username,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "User registered");

        Ok(CreatedUserResponse {
            message: "User created successfully".to_string(),
            user_id: user.id,
        })
    }

    #[instrument(skip(self))]
    pub async fn get(&self, user_id: UserId) -> ServiceResult<UserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))?;
        Ok(UserResponse::from(&user))
    }

    /// Change name and/or email; at least one must be given
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        user_id: UserId,
        request: UpdateUserRequest,
    ) -> ServiceResult<UserResponse> {
        let update = UserUpdate {
            name: request.name,
            email: request.email,
        };
        if update.is_empty() {
            return Err(ServiceError::validation("No fields to update"));
        }

        let user = self.ctx.user_repo().update(user_id, &update).await?;
        info!(user_id = %user.id, "User updated");
        Ok(UserResponse::from(&user))
    }

    /// Delete an account and everything that references it
    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: UserId) -> ServiceResult<()> {
        self.ctx.user_repo().delete(user_id).await?;
        info!(user_id = %user_id, "User deleted");
        Ok(())
    }
}
