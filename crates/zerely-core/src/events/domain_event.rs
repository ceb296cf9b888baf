//! Domain events - emitted when posts, comments, reactions or balances change
//!
//! Consumers subscribe in-process (live feed refresh, audit logging).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{ReactionEmoji, Snowflake};

/// All possible domain events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    // =========================================================================
    // Post Events
    // =========================================================================
    PostCreated(PostCreatedEvent),
    PostDeleted(PostDeletedEvent),
    PostExpired(PostExpiredEvent),

    // =========================================================================
    // Comment Events
    // =========================================================================
    CommentCreated(CommentCreatedEvent),
    CommentDeleted(CommentDeletedEvent),

    // =========================================================================
    // Reaction Events
    // =========================================================================
    ReactionAdded(ReactionAddedEvent),
    ReactionRemoved(ReactionRemovedEvent),
    ReactionChanged(ReactionChangedEvent),

    // =========================================================================
    // Token Events
    // =========================================================================
    TokensCredited(TokensCreditedEvent),
}

impl DomainEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::PostCreated(_) => "POST_CREATED",
            Self::PostDeleted(_) => "POST_DELETED",
            Self::PostExpired(_) => "POST_EXPIRED",
            Self::CommentCreated(_) => "COMMENT_CREATED",
            Self::CommentDeleted(_) => "COMMENT_DELETED",
            Self::ReactionAdded(_) => "REACTION_ADDED",
            Self::ReactionRemoved(_) => "REACTION_REMOVED",
            Self::ReactionChanged(_) => "REACTION_CHANGED",
            Self::TokensCredited(_) => "TOKENS_CREDITED",
        }
    }

    /// Get the timestamp of the event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::PostCreated(e) => e.timestamp,
            Self::PostDeleted(e) => e.timestamp,
            Self::PostExpired(e) => e.timestamp,
            Self::CommentCreated(e) => e.timestamp,
            Self::CommentDeleted(e) => e.timestamp,
            Self::ReactionAdded(e) => e.timestamp,
            Self::ReactionRemoved(e) => e.timestamp,
            Self::ReactionChanged(e) => e.timestamp,
            Self::TokensCredited(e) => e.timestamp,
        }
    }

    /// The post the event concerns, if any
    pub fn post_id(&self) -> Option<Snowflake> {
        match self {
            Self::PostCreated(e) => Some(e.post_id),
            Self::PostDeleted(e) => Some(e.post_id),
            Self::PostExpired(e) => Some(e.post_id),
            Self::CommentCreated(e) => Some(e.post_id),
            Self::CommentDeleted(e) => Some(e.post_id),
            Self::ReactionAdded(e) => Some(e.post_id),
            Self::ReactionRemoved(e) => Some(e.post_id),
            Self::ReactionChanged(e) => Some(e.post_id),
            Self::TokensCredited(e) => e.post_id,
        }
    }
}

// ============================================================================
// Event Structs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCreatedEvent {
    pub post_id: Snowflake,
    pub author_id: Snowflake,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDeletedEvent {
    pub post_id: Snowflake,
    pub deleted_by: Snowflake,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostExpiredEvent {
    pub post_id: Snowflake,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentCreatedEvent {
    pub comment_id: Snowflake,
    pub post_id: Snowflake,
    pub author_id: Snowflake,
    pub parent_id: Option<Snowflake>,
    pub timestamp: DateTime<Utc>,
}

/// A comment was deleted together with `removed - 1` replies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentDeletedEvent {
    pub comment_id: Snowflake,
    pub post_id: Snowflake,
    pub deleted_by: Snowflake,
    pub removed: u32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionAddedEvent {
    pub post_id: Snowflake,
    pub user_id: Snowflake,
    pub emoji: ReactionEmoji,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionRemovedEvent {
    pub post_id: Snowflake,
    pub user_id: Snowflake,
    pub emoji: ReactionEmoji,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionChangedEvent {
    pub post_id: Snowflake,
    pub user_id: Snowflake,
    pub from: ReactionEmoji,
    pub to: ReactionEmoji,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokensReason {
    PostCreated,
    ReactionReceived,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokensCreditedEvent {
    pub user_id: Snowflake,
    pub post_id: Option<Snowflake>,
    pub amount: u64,
    pub balance: u64,
    pub reason: TokensReason,
    pub timestamp: DateTime<Utc>,
}
