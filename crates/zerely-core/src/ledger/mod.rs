//! Reaction ledger
//!
//! Reconciles one user's reaction choice against a post's reaction list and
//! per-emoji counts, and reports whether the post's author is owed a token.
//! Pure: persistence and crediting belong to the caller.

mod reaction_ledger;

pub use reaction_ledger::{
    apply_emoji, apply_reaction, ReactionChange, ReactionOutcome, FIRST_REACTION_REWARD,
};
