use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use zerely_core::{AutoDelete, Mood, Reaction, ReactionCounts, Snowflake};

/// Stored post document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDocument {
    #[serde(rename = "_id")]
    pub id: Snowflake,
    pub author: Snowflake,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    pub mood: Mood,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
    #[serde(default)]
    pub reaction_counts: ReactionCounts,
    #[serde(default)]
    pub comment_count: u32,
    #[serde(default)]
    pub auto_delete: AutoDelete,
    #[serde(default = "visible_by_default")]
    pub is_visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub rewarded_reactors: Vec<Snowflake>,
    #[serde(rename = "__v", default)]
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn visible_by_default() -> bool {
    true
}

impl PostDocument {
    /// Newest first; IDs break ties between posts created in the same instant
    pub fn newest_first(a: &Self, b: &Self) -> std::cmp::Ordering {
        b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id))
    }
}
