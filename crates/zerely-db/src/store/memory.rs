//! In-memory document store
//!
//! One `DashMap` per collection. Single-document updates go through
//! `get_mut`, which holds the shard write lock for the duration of the
//! closure, so a check-then-write on one document is atomic.

use std::sync::Arc;

use dashmap::DashMap;
use zerely_core::Snowflake;

use crate::models::{CommentDocument, PostDocument, UserDocument};

/// Shared handle to the store
pub type SharedStore = Arc<MemoryStore>;

/// Document collections keyed by ID
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub(crate) posts: DashMap<Snowflake, PostDocument>,
    pub(crate) users: DashMap<Snowflake, UserDocument>,
    pub(crate) comments: DashMap<Snowflake, CommentDocument>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn new_shared() -> SharedStore {
        Arc::new(Self::new())
    }

    /// Number of stored posts, hidden ones included
    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    /// Number of stored comments across all posts
    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    /// Raw copy of a stored post document
    pub fn post_document(&self, id: Snowflake) -> Option<PostDocument> {
        self.posts.get(&id).map(|doc| doc.clone())
    }

    /// Insert or replace a post document as-is, bypassing repository checks
    ///
    /// Used to load fixtures and documents written by other processes.
    pub fn put_post_document(&self, doc: PostDocument) {
        tracing::debug!(post_id = %doc.id, "Post document stored");
        self.posts.insert(doc.id, doc);
    }
}
