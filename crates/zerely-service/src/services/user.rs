//! User service
//!
//! Anonymous accounts and token balances.

use tracing::{info, instrument};

use zerely_core::{generate_anonymous_name, Snowflake, User};

use crate::dto::{TokenBalanceResponse, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a user with a generated anonymous name and no tokens
    #[instrument(skip(self))]
    pub async fn register_anonymous(&self) -> ServiceResult<UserResponse> {
        let user = User::new(self.ctx.generate_id(), generate_anonymous_name());
        self.ctx.user_repo().create(&user).await?;

        info!(user_id = %user.id, anonymous_name = %user.anonymous_name, "User registered");

        Ok(UserResponse::from(&user))
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: Snowflake) -> ServiceResult<UserResponse> {
        Ok(UserResponse::from(&self.get_user_entity(user_id).await?))
    }

    /// Get user entity by ID
    #[instrument(skip(self))]
    pub async fn get_user_entity(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn token_balance(&self, user_id: Snowflake) -> ServiceResult<TokenBalanceResponse> {
        let user = self.get_user_entity(user_id).await?;
        Ok(TokenBalanceResponse {
            tokens: user.tokens,
        })
    }
}
