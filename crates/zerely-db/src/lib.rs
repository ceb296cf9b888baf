//! # zerely-db
//!
//! Document storage implementing the repository traits from `zerely-core`.
//!
//! Posts, comments and users are kept as documents in the same shape the web client
//! sees on the wire. Reaction writes are conditional on the document
//! version, so concurrent reactions to one post never overwrite each other.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use zerely_db::{MemoryPostRepository, MemoryStore};
//! use zerely_core::PostRepository;
//!
//! let store = MemoryStore::new_shared();
//! let posts: Arc<dyn PostRepository> = Arc::new(MemoryPostRepository::new(store.clone()));
//! ```

pub mod mappers;
pub mod models;
pub mod repositories;
pub mod store;

// Re-export commonly used types
pub use models::{CommentDocument, PostDocument, UserDocument};
pub use repositories::{MemoryCommentRepository, MemoryPostRepository, MemoryUserRepository};
pub use store::{MemoryStore, SharedStore};
