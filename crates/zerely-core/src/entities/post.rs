//! Post entity - a mood-tagged anonymous vent

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::reaction::ReactionState;
use super::user::User;
use crate::value_objects::{Mood, Snowflake};

/// Auto-delete schedule of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoDelete {
    pub enabled: bool,
    pub delete_at: Option<DateTime<Utc>>,
}

impl AutoDelete {
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Schedule deletion `hours` after `now`
    pub fn after_hours(now: DateTime<Utc>, hours: u32) -> Self {
        Self {
            enabled: true,
            delete_at: Some(now + Duration::hours(i64::from(hours))),
        }
    }

    /// Whether the post is due for deletion at `now`
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.enabled && self.delete_at.is_some_and(|at| at <= now)
    }
}

/// Post entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub title: Option<String>,
    pub content: String,
    pub mood: Mood,
    pub reactions: ReactionState,
    pub comment_count: u32,
    pub auto_delete: AutoDelete,
    pub is_visible: bool,
    pub ip_address: Option<String>,
    /// Users whose first reaction already earned the author a token
    pub rewarded_reactors: Vec<Snowflake>,
    /// Bumped on every reaction write
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a visible post with no reactions
    pub fn new(id: Snowflake, author_id: Snowflake, content: String, mood: Mood) -> Self {
        let now = Utc::now();
        Self {
            id,
            author_id,
            title: None,
            content,
            mood,
            reactions: ReactionState::new(),
            comment_count: 0,
            auto_delete: AutoDelete::disabled(),
            is_visible: true,
            ip_address: None,
            rewarded_reactors: Vec::new(),
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_auto_delete(mut self, auto_delete: AutoDelete) -> Self {
        self.auto_delete = auto_delete;
        self
    }

    pub fn with_ip_address(mut self, ip: Option<String>) -> Self {
        self.ip_address = ip;
        self
    }

    /// Authors may delete their own posts, admins may delete any
    pub fn can_be_deleted_by(&self, user: &User) -> bool {
        self.author_id == user.id || user.is_admin()
    }

    /// Reaction tokens credited to the author for this post so far
    pub fn reaction_tokens_awarded(&self) -> u32 {
        self.rewarded_reactors.len() as u32
    }

    /// Whether a reward reported by the ledger for `user_id` should be
    /// credited: once per reacting user, at most `cap` per post
    pub fn should_reward(&self, user_id: Snowflake, cap: u32) -> bool {
        self.reaction_tokens_awarded() < cap && !self.rewarded_reactors.contains(&user_id)
    }
}
