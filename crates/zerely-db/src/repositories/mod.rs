//! Repository implementations over [`crate::store::MemoryStore`]

mod comment;
mod error;
mod post;
mod user;

pub use comment::MemoryCommentRepository;
pub use post::MemoryPostRepository;
pub use user::MemoryUserRepository;
