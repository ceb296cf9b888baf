//! Repository traits (ports)

mod repositories;

pub use repositories::{
    CommentRepository, PostQuery, PostRepository, ReactionUpdate, RepoResult, UserRepository,
};
