//! Comment entity - a supportive reply under a post

use chrono::{DateTime, Utc};

use super::user::User;
use crate::value_objects::Snowflake;

/// Comment entity
///
/// Threads are one level deep: a reply always points at a top-level
/// comment of the same post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub post_id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    pub parent_id: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a top-level comment
    pub fn new(id: Snowflake, post_id: Snowflake, author_id: Snowflake, content: String) -> Self {
        Self {
            id,
            post_id,
            author_id,
            content,
            parent_id: None,
            created_at: Utc::now(),
        }
    }

    /// Create a reply in the thread started by `parent`
    ///
    /// Replying to a reply lands in the same thread, under its root.
    pub fn new_reply(
        id: Snowflake,
        author_id: Snowflake,
        content: String,
        parent: &Comment,
    ) -> Self {
        Self {
            parent_id: Some(parent.thread_root()),
            ..Self::new(id, parent.post_id, author_id, content)
        }
    }

    #[inline]
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    /// ID of the top-level comment of this comment's thread
    pub fn thread_root(&self) -> Snowflake {
        self.parent_id.unwrap_or(self.id)
    }

    /// Authors may delete their own comments, admins may delete any
    pub fn can_be_deleted_by(&self, user: &User) -> bool {
        self.author_id == user.id || user.is_admin()
    }
}
