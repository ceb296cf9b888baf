//! Domain entities - core business objects

mod comment;
mod post;
mod reaction;
mod user;

pub use comment::Comment;
pub use post::{AutoDelete, Post};
pub use reaction::{Reaction, ReactionCounts, ReactionState};
pub use user::{generate_anonymous_name, User, UserRole};
