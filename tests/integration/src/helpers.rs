//! Test helpers for integration tests
//!
//! Provides a fully wired application over a fresh document store, plus
//! assertions on service errors and response JSON.

use std::collections::HashMap;

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use zerely_common::{
    try_init_tracing_with_config, AppConfig, AppError, ErrorResponse, TracingConfig,
};
use zerely_core::{Snowflake, User, UserRole};
use zerely_db::{MemoryStore, SharedStore};
use zerely_service::dto::{CreatePostRequest, CreatePostResponse, UserResponse};
use zerely_service::{
    CommentService, ExpiryService, PostService, ReactionService, ServiceContext,
    ServiceContextBuilder, ServiceError, UserService,
};

/// Configuration used by tests: defaults plus any overrides given as
/// environment-style pairs
pub fn test_config(overrides: &[(&'static str, &str)]) -> Result<AppConfig> {
    let vars: HashMap<&'static str, String> = overrides
        .iter()
        .map(|(k, v)| (*k, (*v).to_string()))
        .collect();
    Ok(AppConfig::from_lookup(|key| vars.get(key).cloned())?)
}

/// Application instance backed by its own store
pub struct TestApp {
    pub ctx: ServiceContext,
    pub store: SharedStore,
}

impl TestApp {
    /// Start with default configuration
    pub fn start() -> Result<Self> {
        Self::start_with_config(test_config(&[])?)
    }

    pub fn start_with_config(config: AppConfig) -> Result<Self> {
        // Several tests share the process; only the first install wins
        let _ = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env));

        let store = MemoryStore::new_shared();
        let ctx = ServiceContextBuilder::new()
            .memory_store(store.clone())
            .config(config)
            .build()?;

        Ok(Self { ctx, store })
    }

    pub fn posts(&self) -> PostService<'_> {
        PostService::new(&self.ctx)
    }

    pub fn comments(&self) -> CommentService<'_> {
        CommentService::new(&self.ctx)
    }

    pub fn reactions(&self) -> ReactionService<'_> {
        ReactionService::new(&self.ctx)
    }

    pub fn users(&self) -> UserService<'_> {
        UserService::new(&self.ctx)
    }

    pub fn expiry(&self) -> ExpiryService<'_> {
        ExpiryService::new(&self.ctx)
    }

    /// Register an anonymous user and return their ID
    pub async fn register(&self) -> Result<Snowflake> {
        let user: UserResponse = self.users().register_anonymous().await?;
        Ok(user.id.parse()?)
    }

    /// Insert an admin directly; there is no public way to become one
    pub async fn register_admin(&self) -> Result<Snowflake> {
        let mut admin = User::new(self.ctx.generate_id(), "Patient Heron 01".into());
        admin.role = UserRole::Admin;
        self.ctx.user_repo().create(&admin).await?;
        Ok(admin.id)
    }

    /// Create a post and return its ID along with the response
    pub async fn create_post(
        &self,
        author: Snowflake,
        request: CreatePostRequest,
    ) -> Result<(Snowflake, CreatePostResponse)> {
        let created = self.posts().create_post(author, request, None).await?;
        Ok((created.post.id.parse()?, created))
    }

    pub async fn balance(&self, user: Snowflake) -> Result<u64> {
        Ok(self.users().token_balance(user).await?.tokens)
    }
}

/// Assert a service error maps to `status` and `code` at the API edge
///
/// # Panics
/// Panics when the error reports a different status or code.
pub fn assert_api_error(err: ServiceError, status: u16, code: &str) {
    let app: AppError = err.into();
    assert_eq!(app.status_code(), status, "unexpected status for {app}");
    let body = ErrorResponse::from(&app);
    assert!(!body.success);
    assert_eq!(body.code, code);
}

/// Serialize a response the way it would be sent to a client
///
/// # Panics
/// Panics if the value cannot be serialized.
pub fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).expect("response must serialize")
}
