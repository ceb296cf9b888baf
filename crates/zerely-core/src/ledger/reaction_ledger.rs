use crate::entities::{Reaction, ReactionState};
use crate::error::DomainError;
use crate::value_objects::{ReactionEmoji, Snowflake};

/// Tokens owed to a post's author for a user's first reaction
///
/// The ledger reports this on every add, including a re-add after undo.
/// Callers deduplicate per reacting user before crediting.
pub const FIRST_REACTION_REWARD: u32 = 1;

/// Which branch of the toggle/change rule a call took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionChange {
    /// User had no reaction; one was added
    Added(ReactionEmoji),
    /// User re-selected their emoji; the reaction was removed
    Removed(ReactionEmoji),
    /// User switched emoji
    Changed {
        from: ReactionEmoji,
        to: ReactionEmoji,
    },
}

impl ReactionChange {
    /// The user's reaction after the change
    pub fn current(&self) -> Option<ReactionEmoji> {
        match *self {
            Self::Added(emoji) | Self::Changed { to: emoji, .. } => Some(emoji),
            Self::Removed(_) => None,
        }
    }
}

/// Result of applying one reaction to a post's state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionOutcome {
    pub state: ReactionState,
    pub change: ReactionChange,
    /// `FIRST_REACTION_REWARD` on the add path, otherwise 0
    pub token_reward: u32,
    /// The input state had duplicate users or drifted counts and was
    /// rebuilt from the list before applying
    pub repaired: bool,
}

/// Apply `emoji` (as sent by the client) from `user_id` to `state`.
///
/// Fails with [`DomainError::InvalidReaction`] for an unsupported symbol;
/// nothing is computed in that case.
pub fn apply_reaction(
    state: &ReactionState,
    user_id: Snowflake,
    emoji: &str,
) -> Result<ReactionOutcome, DomainError> {
    let emoji = ReactionEmoji::parse(emoji)?;
    Ok(apply_emoji(state, user_id, emoji))
}

/// Apply an already-validated emoji. Counts in the returned state always
/// match the returned list.
pub fn apply_emoji(
    state: &ReactionState,
    user_id: Snowflake,
    emoji: ReactionEmoji,
) -> ReactionOutcome {
    let mut next = state.clone();
    let repaired = next.normalize();

    let (change, token_reward) = match next.position_of(user_id) {
        None => {
            next.reactions.push(Reaction::new(user_id, emoji));
            next.reaction_counts.increment(emoji);
            (ReactionChange::Added(emoji), FIRST_REACTION_REWARD)
        }
        Some(index) if next.reactions[index].is_emoji(emoji) => {
            next.reactions.remove(index);
            next.reaction_counts.decrement(emoji);
            (ReactionChange::Removed(emoji), 0)
        }
        Some(index) => {
            let previous = next.reactions.remove(index).emoji;
            next.reaction_counts.decrement(previous);
            next.reactions.push(Reaction::new(user_id, emoji));
            next.reaction_counts.increment(emoji);
            (
                ReactionChange::Changed {
                    from: previous,
                    to: emoji,
                },
                0,
            )
        }
    };

    debug_assert!(next.is_consistent());

    ReactionOutcome {
        state: next,
        change,
        token_reward,
        repaired,
    }
}
