//! Service context - dependency container for services
//!
//! Holds the repositories, the ID generator, runtime settings and the
//! in-process event bus.

use std::sync::Arc;

use tokio::sync::broadcast;

use zerely_common::AppConfig;
use zerely_core::traits::{CommentRepository, PostRepository, UserRepository};
use zerely_core::{DomainEvent, Snowflake, SnowflakeGenerator};
use zerely_db::{
    MemoryCommentRepository, MemoryPostRepository, MemoryUserRepository, SharedStore,
};

use super::error::{ServiceError, ServiceResult};

/// Buffered events per subscriber before slow receivers start lagging
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Service context containing all dependencies
///
/// Cheap to clone; every field is shared.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    post_repo: Arc<dyn PostRepository>,
    comment_repo: Arc<dyn CommentRepository>,

    // Settings
    config: Arc<AppConfig>,

    // Events
    events: broadcast::Sender<DomainEvent>,

    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        post_repo: Arc<dyn PostRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        config: Arc<AppConfig>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            user_repo,
            post_repo,
            comment_repo,
            config,
            events,
            snowflake_generator,
        }
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    // === Settings ===

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    // === Events ===

    /// Publish a domain event; having no subscribers is not an error
    pub fn publish(&self, event: DomainEvent) {
        tracing::debug!(event_type = event.event_type(), "Publishing domain event");
        self.events.send(event).ok();
    }

    /// Receive every event published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.events.subscribe()
    }

    // === IDs ===

    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("config", &self.config)
            .field("subscribers", &self.events.receiver_count())
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    config: Option<AppConfig>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    /// Use the document store for every repository
    pub fn memory_store(self, store: SharedStore) -> Self {
        self.user_repo(Arc::new(MemoryUserRepository::new(store.clone())))
            .post_repo(Arc::new(MemoryPostRepository::new(store.clone())))
            .comment_repo(Arc::new(MemoryCommentRepository::new(store)))
    }

    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// Config falls back to defaults; the generator to one using the
    /// configured worker ID.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if a repository is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let config = self.config.unwrap_or_default();
        let snowflake_generator = self.snowflake_generator.unwrap_or_else(|| {
            Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id))
        });

        Ok(ServiceContext::new(
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.post_repo
                .ok_or_else(|| ServiceError::validation("post_repo is required"))?,
            self.comment_repo
                .ok_or_else(|| ServiceError::validation("comment_repo is required"))?,
            Arc::new(config),
            snowflake_generator,
        ))
    }
}
