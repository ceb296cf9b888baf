use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use zerely_core::Snowflake;

/// Stored comment document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDocument {
    #[serde(rename = "_id")]
    pub id: Snowflake,
    pub post: Snowflake,
    pub author: Snowflake,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_comment: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
}

impl CommentDocument {
    /// Oldest first; IDs break ties between comments created in the same instant
    pub fn oldest_first(a: &Self, b: &Self) -> std::cmp::Ordering {
        a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id))
    }
}
