//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Post not found: {0}")]
    PostNotFound(Snowflake),

    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid reaction: {0}")]
    InvalidReaction(String),

    #[error("Invalid mood: {0}")]
    InvalidMood(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not post author")]
    NotPostAuthor,

    #[error("Not comment author")]
    NotCommentAuthor,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Post {post_id} was modified concurrently (expected version {expected})")]
    VersionConflict { post_id: Snowflake, expected: u64 },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",

            Self::InvalidReaction(_) => "INVALID_REACTION",
            Self::InvalidMood(_) => "INVALID_MOOD",

            Self::NotPostAuthor => "NOT_POST_AUTHOR",
            Self::NotCommentAuthor => "NOT_COMMENT_AUTHOR",

            Self::VersionConflict { .. } => "VERSION_CONFLICT",

            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PostNotFound(_) | Self::UserNotFound(_) | Self::CommentNotFound(_)
        )
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidReaction(_) | Self::InvalidMood(_))
    }

    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotPostAuthor | Self::NotCommentAuthor)
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::VersionConflict { .. })
    }
}
