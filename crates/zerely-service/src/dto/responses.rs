//! Response DTOs
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.
//! Post responses never carry the author's IP address.

use chrono::{DateTime, Utc};
use serde::Serialize;

use zerely_core::{AutoDelete, Mood, ReactionCounts, ReactionEmoji, UserRole};

// ============================================================================
// Post Responses
// ============================================================================

/// Author as shown on a post: anonymous name only
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub id: String,
    pub anonymous_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub author: AuthorResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    pub mood: Mood,
    pub reaction_counts: ReactionCounts,
    /// The viewer's own reaction, when a viewer is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_reaction: Option<ReactionEmoji>,
    pub comment_count: u32,
    pub auto_delete: AutoDelete,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One page of the feed
#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub data: Vec<PostResponse>,
    pub page: u32,
    /// `ceil(visible posts / page size)`
    pub pages: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostResponse {
    pub post: PostResponse,
    pub tokens_earned: u64,
    pub new_token_balance: u64,
}

// ============================================================================
// Comment Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub author: AuthorResponse,
    pub content: String,
    /// Top-level comment this reply belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentResponse {
    pub comment: CommentResponse,
    pub comment_count: u32,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCommentResponse {
    /// The comment plus any replies removed with it
    pub removed: u32,
    pub comment_count: u32,
}

// ============================================================================
// Reaction Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionResponse {
    pub reaction_counts: ReactionCounts,
    /// `null` after a toggle-off
    pub my_reaction: Option<ReactionEmoji>,
    /// Tokens credited to the post's author by this call
    pub tokens_awarded: u64,
}

// ============================================================================
// User Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub anonymous_name: String,
    pub role: UserRole,
    pub tokens: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TokenBalanceResponse {
    pub tokens: u64,
}
