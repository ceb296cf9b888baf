//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use zerely_core::{Comment, Post, Snowflake, User};

use super::responses::{AuthorResponse, CommentResponse, PostResponse, UserResponse};

/// Shown when a post's or comment's author no longer exists
pub const UNKNOWN_AUTHOR_NAME: &str = "Anonymous";

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            anonymous_name: user.anonymous_name.clone(),
            role: user.role,
            tokens: user.tokens,
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Post Mappers
// ============================================================================

/// Post with the data needed to render it for one viewer
pub struct PostWithAuthor {
    pub post: Post,
    /// `None` if the author record is gone
    pub author_name: Option<String>,
    pub viewer: Option<Snowflake>,
}

impl From<PostWithAuthor> for PostResponse {
    fn from(details: PostWithAuthor) -> Self {
        let post = details.post;
        let my_reaction = details
            .viewer
            .and_then(|viewer| post.reactions.reaction_of(viewer));

        Self {
            id: post.id.to_string(),
            author: author_response(post.author_id, details.author_name),
            title: post.title,
            content: post.content,
            mood: post.mood,
            reaction_counts: post.reactions.reaction_counts,
            my_reaction,
            comment_count: post.comment_count,
            auto_delete: post.auto_delete,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

fn author_response(id: Snowflake, name: Option<String>) -> AuthorResponse {
    AuthorResponse {
        id: id.to_string(),
        anonymous_name: name.unwrap_or_else(|| UNKNOWN_AUTHOR_NAME.to_string()),
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

pub struct CommentWithAuthor {
    pub comment: Comment,
    pub author_name: Option<String>,
}

impl From<CommentWithAuthor> for CommentResponse {
    fn from(details: CommentWithAuthor) -> Self {
        let comment = details.comment;
        Self {
            id: comment.id.to_string(),
            post_id: comment.post_id.to_string(),
            author: author_response(comment.author_id, details.author_name),
            content: comment.content,
            parent_comment: comment.parent_id.map(|id| id.to_string()),
            created_at: comment.created_at,
        }
    }
}
