//! # zerely-core
//!
//! Domain layer for Zerely: posts, comments, users, the reaction ledger, repository
//! ports and domain events. Nothing in here touches storage or the network.

pub mod entities;
pub mod error;
pub mod events;
pub mod ledger;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    generate_anonymous_name, AutoDelete, Comment, Post, Reaction, ReactionCounts, ReactionState,
    User, UserRole,
};
pub use error::DomainError;
pub use events::DomainEvent;
pub use ledger::{
    apply_emoji, apply_reaction, ReactionChange, ReactionOutcome, FIRST_REACTION_REWARD,
};
pub use traits::{
    CommentRepository, PostQuery, PostRepository, ReactionUpdate, RepoResult, UserRepository,
};
pub use value_objects::{Mood, ReactionEmoji, Snowflake, SnowflakeGenerator, SnowflakeParseError};
