//! Request DTOs
//!
//! All request DTOs implement `Deserialize`; those with free-form input also
//! implement `Validate`.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Post Requests
// ============================================================================

/// Create post request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 10, max = 5000, message = "Content must be 10-5000 characters"))]
    pub content: String,

    /// Parsed into a `Mood` by the service so unknown values report `INVALID_MOOD`
    pub mood: String,

    #[serde(default)]
    pub auto_delete: Option<AutoDeleteRequest>,
}

impl CreatePostRequest {
    /// Stored text is trimmed before length checks apply
    #[must_use]
    pub fn trimmed(mut self) -> Self {
        self.content = self.content.trim().to_string();
        self.title = self
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        self
    }
}

/// Auto-delete option on post creation
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct AutoDeleteRequest {
    #[serde(default)]
    pub enabled: bool,
    pub hours: Option<u32>,
}

/// Feed query parameters
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPostsQuery {
    /// 1-based; missing or 0 means the first page
    #[serde(alias = "pageNumber")]
    pub page: Option<u32>,
    pub mood: Option<String>,
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Create comment or reply request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 1000, message = "Comment must be 1-1000 characters"))]
    pub content: String,
}

impl CreateCommentRequest {
    #[must_use]
    pub fn trimmed(mut self) -> Self {
        self.content = self.content.trim().to_string();
        self
    }
}

// ============================================================================
// Reaction Requests
// ============================================================================

/// React to post request
#[derive(Debug, Clone, Deserialize)]
pub struct ReactRequest {
    pub emoji: String,
}
