//! Error helpers for repositories

use zerely_core::{DomainError, Snowflake};

/// Create a "post not found" error
pub fn post_not_found(id: Snowflake) -> DomainError {
    DomainError::PostNotFound(id)
}

/// Create a "user not found" error
pub fn user_not_found(id: Snowflake) -> DomainError {
    DomainError::UserNotFound(id)
}

/// Create a "comment not found" error
pub fn comment_not_found(id: Snowflake) -> DomainError {
    DomainError::CommentNotFound(id)
}

/// Create a duplicate-key error for a document collection
pub fn duplicate_key(collection: &str, id: Snowflake) -> DomainError {
    DomainError::DatabaseError(format!("duplicate key in {collection}: {id}"))
}
