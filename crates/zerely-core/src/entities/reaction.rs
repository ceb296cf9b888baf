//! Reaction sub-state of a post: the per-user reaction list and its
//! per-emoji aggregate.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

use crate::error::DomainError;
use crate::value_objects::{ReactionEmoji, Snowflake};

/// A single user's live reaction on a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    pub user_id: Snowflake,
    pub emoji: ReactionEmoji,
}

impl Reaction {
    pub fn new(user_id: Snowflake, emoji: ReactionEmoji) -> Self {
        Self { user_id, emoji }
    }

    #[inline]
    pub fn is_emoji(&self, emoji: ReactionEmoji) -> bool {
        self.emoji == emoji
    }
}

/// Count of reactions per supported emoji.
///
/// Serializes as a `{ symbol: count }` map containing every supported
/// symbol, zero counts included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "BTreeMap<String, u32>")]
pub struct ReactionCounts([u32; ReactionEmoji::COUNT]);

impl ReactionCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild counts from a reaction list
    pub fn from_reactions(reactions: &[Reaction]) -> Self {
        let mut counts = Self::new();
        for reaction in reactions {
            counts.increment(reaction.emoji);
        }
        counts
    }

    #[inline]
    pub fn get(&self, emoji: ReactionEmoji) -> u32 {
        self.0[emoji.index()]
    }

    pub fn increment(&mut self, emoji: ReactionEmoji) {
        let slot = &mut self.0[emoji.index()];
        *slot = slot.saturating_add(1);
    }

    /// Decrement, never going below zero
    pub fn decrement(&mut self, emoji: ReactionEmoji) {
        let slot = &mut self.0[emoji.index()];
        *slot = slot.saturating_sub(1);
    }

    pub fn iter(&self) -> impl Iterator<Item = (ReactionEmoji, u32)> + '_ {
        ReactionEmoji::ALL.into_iter().map(|emoji| (emoji, self.get(emoji)))
    }
}

impl Serialize for ReactionCounts {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(ReactionEmoji::COUNT))?;
        for (emoji, count) in self.iter() {
            map.serialize_entry(emoji.symbol(), &count)?;
        }
        map.end()
    }
}

impl TryFrom<BTreeMap<String, u32>> for ReactionCounts {
    type Error = DomainError;

    fn try_from(raw: BTreeMap<String, u32>) -> Result<Self, Self::Error> {
        let mut counts = Self::new();
        for (symbol, count) in raw {
            let emoji = ReactionEmoji::parse(&symbol)?;
            counts.0[emoji.index()] = count;
        }
        Ok(counts)
    }
}

/// Reaction state of one post: the list is authoritative, counts are a
/// cached aggregate over it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionState {
    pub reactions: Vec<Reaction>,
    pub reaction_counts: ReactionCounts,
}

impl ReactionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state whose counts are derived from `reactions`
    pub fn from_reactions(reactions: Vec<Reaction>) -> Self {
        let reaction_counts = ReactionCounts::from_reactions(&reactions);
        Self {
            reactions,
            reaction_counts,
        }
    }

    /// Index of the user's reaction in the list, if any
    pub fn position_of(&self, user_id: Snowflake) -> Option<usize> {
        self.reactions.iter().position(|r| r.user_id == user_id)
    }

    /// The emoji the user currently has on this post
    pub fn reaction_of(&self, user_id: Snowflake) -> Option<ReactionEmoji> {
        self.position_of(user_id).map(|i| self.reactions[i].emoji)
    }

    /// Counts match the list for every emoji and no user appears twice
    pub fn is_consistent(&self) -> bool {
        if ReactionCounts::from_reactions(&self.reactions) != self.reaction_counts {
            return false;
        }
        let mut seen = std::collections::HashSet::with_capacity(self.reactions.len());
        self.reactions.iter().all(|r| seen.insert(r.user_id))
    }

    /// Overwrite counts with the values derived from the list
    pub fn recount(&mut self) {
        self.reaction_counts = ReactionCounts::from_reactions(&self.reactions);
    }

    /// Drop repeated entries for a user (first one wins) and recount.
    /// Returns `true` if the state was not already consistent.
    pub fn normalize(&mut self) -> bool {
        if self.is_consistent() {
            return false;
        }
        let mut seen = std::collections::HashSet::with_capacity(self.reactions.len());
        self.reactions.retain(|r| seen.insert(r.user_id));
        self.recount();
        true
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.reactions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }
}
