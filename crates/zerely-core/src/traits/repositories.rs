//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs from the document store; the
//! storage crate provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Comment, Post, ReactionState, User};
use crate::error::DomainError;
use crate::value_objects::{Mood, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Post Repository
// ============================================================================

/// Feed query: visible posts, newest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostQuery {
    pub mood: Option<Mood>,
    /// 1-based page number
    pub page: u32,
    pub page_size: u32,
}

impl PostQuery {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            mood: None,
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn with_mood(mut self, mood: Option<Mood>) -> Self {
        self.mood = mood;
        self
    }

    /// Number of posts to skip
    pub fn offset(&self) -> usize {
        (self.page.max(1) as usize - 1) * self.page_size as usize
    }
}

/// Conditional write of a post's reaction sub-state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionUpdate {
    pub post_id: Snowflake,
    /// Version the new state was computed from
    pub expected_version: u64,
    pub state: ReactionState,
    pub rewarded_reactors: Vec<Snowflake>,
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID, visible or not
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>>;

    /// Page of visible posts matching the query, newest first
    async fn find_visible(&self, query: &PostQuery) -> RepoResult<Vec<Post>>;

    /// Number of visible posts, optionally restricted to one mood
    async fn count_visible(&self, mood: Option<Mood>) -> RepoResult<u64>;

    /// All posts by an author, newest first
    async fn find_by_author(&self, author_id: Snowflake) -> RepoResult<Vec<Post>>;

    /// Insert a new post
    async fn create(&self, post: &Post) -> RepoResult<()>;

    /// Remove a post and its reactions
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Replace the reaction state if the stored version still equals
    /// `expected_version`. Returns the new version.
    ///
    /// Fails with `VersionConflict` if another write landed first.
    async fn update_reactions(&self, update: &ReactionUpdate) -> RepoResult<u64>;

    /// Add `delta` to the post's comment count, flooring at zero. Returns
    /// the new count. Leaves `version` alone.
    async fn adjust_comment_count(&self, id: Snowflake, delta: i64) -> RepoResult<u32>;

    /// IDs of posts whose auto-delete time is at or before `now`
    async fn find_expired(&self, now: DateTime<Utc>) -> RepoResult<Vec<Snowflake>>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// Every comment on a post, oldest first
    async fn find_by_post(&self, post_id: Snowflake) -> RepoResult<Vec<Comment>>;

    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    /// Remove a comment and the replies under it. Returns the removed IDs,
    /// the comment itself first.
    async fn delete_thread(&self, id: Snowflake) -> RepoResult<Vec<Snowflake>>;

    /// Remove every comment on a post. Returns how many were removed.
    async fn delete_by_post(&self, post_id: Snowflake) -> RepoResult<usize>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    async fn create(&self, user: &User) -> RepoResult<()>;

    /// Atomically add `amount` to the user's balance, returning the new balance
    async fn credit_tokens(&self, id: Snowflake, amount: u64) -> RepoResult<u64>;
}
