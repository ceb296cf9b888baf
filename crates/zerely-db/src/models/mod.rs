//! Stored document shapes

mod comment;
mod post;
mod user;

pub use comment::CommentDocument;
pub use post::PostDocument;
pub use user::UserDocument;
