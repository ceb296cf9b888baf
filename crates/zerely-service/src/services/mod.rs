//! Business logic services
//!
//! Services borrow a [`ServiceContext`] and orchestrate domain operations
//! over the repositories it holds.

pub mod comment;
pub mod context;
pub mod error;
pub mod expiry;
pub mod post;
pub mod reaction;
pub mod user;

pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use expiry::{spawn_expiry_sweeper, ExpiryService};
pub use post::PostService;
pub use reaction::ReactionService;
pub use user::UserService;
