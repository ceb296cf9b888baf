//! Reaction service
//!
//! Applies the reaction ledger to a post and settles the author's reward.
//!
//! Each attempt reads a snapshot of the post, computes the new reaction
//! state and writes it back conditionally on the snapshot's version. A lost
//! race reloads and recomputes, so concurrent reactions never overwrite each
//! other. The reward bookkeeping (`rewarded_reactors`) is part of that same
//! write; the balance credit follows it and is at most once per reactor.

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use zerely_core::events::{
    ReactionAddedEvent, ReactionChangedEvent, ReactionRemovedEvent, TokensCreditedEvent,
    TokensReason,
};
use zerely_core::{
    apply_emoji, DomainError, DomainEvent, Post, ReactionChange, ReactionEmoji, ReactionOutcome,
    ReactionUpdate, Snowflake, FIRST_REACTION_REWARD,
};

use crate::dto::ReactionResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// React to a post with `emoji`
    ///
    /// Re-sending the current emoji removes the reaction; a different emoji
    /// replaces it.
    #[instrument(skip(self))]
    pub async fn react_to_post(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
        emoji: &str,
    ) -> ServiceResult<ReactionResponse> {
        // Reject before touching the store
        let emoji = ReactionEmoji::parse(emoji)?;

        let max_attempts = self.ctx.config().reactions.max_write_attempts.max(1);
        let cap = self.ctx.config().rewards.reaction_reward_cap;
        let mut attempt = 0;

        loop {
            attempt += 1;

            let post = self.load_visible(post_id).await?;
            let outcome = apply_emoji(&post.reactions, user_id, emoji);
            if outcome.repaired {
                warn!(post_id = %post_id, "Repaired inconsistent reaction state");
            }

            let reward = outcome.token_reward > 0 && post.should_reward(user_id, cap);
            let mut rewarded_reactors = post.rewarded_reactors.clone();
            if reward {
                rewarded_reactors.push(user_id);
            }

            let update = ReactionUpdate {
                post_id,
                expected_version: post.version,
                state: outcome.state.clone(),
                rewarded_reactors,
            };

            match self.ctx.post_repo().update_reactions(&update).await {
                Ok(version) => {
                    debug!(post_id = %post_id, version, attempt, "Reaction state written");
                    return Ok(self.settle(&post, user_id, outcome, reward).await);
                }
                Err(DomainError::VersionConflict { .. }) if attempt < max_attempts => {
                    debug!(post_id = %post_id, attempt, "Reaction write lost a race, retrying");
                    tokio::task::yield_now().await;
                }
                Err(e) => {
                    if matches!(e, DomainError::VersionConflict { .. }) {
                        warn!(
                            post_id = %post_id,
                            attempts = attempt,
                            "Reaction write kept conflicting"
                        );
                    }
                    return Err(e.into());
                }
            }
        }
    }

    async fn load_visible(&self, post_id: Snowflake) -> ServiceResult<Post> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .filter(|post| post.is_visible)
            .ok_or(DomainError::PostNotFound(post_id))?;
        Ok(post)
    }

    /// After a committed write: emit events and credit the author
    async fn settle(
        &self,
        post: &Post,
        user_id: Snowflake,
        outcome: ReactionOutcome,
        reward: bool,
    ) -> ReactionResponse {
        let now = Utc::now();
        let post_id = post.id;

        let event = match outcome.change {
            ReactionChange::Added(emoji) => DomainEvent::ReactionAdded(ReactionAddedEvent {
                post_id,
                user_id,
                emoji,
                timestamp: now,
            }),
            ReactionChange::Removed(emoji) => DomainEvent::ReactionRemoved(ReactionRemovedEvent {
                post_id,
                user_id,
                emoji,
                timestamp: now,
            }),
            ReactionChange::Changed { from, to } => {
                DomainEvent::ReactionChanged(ReactionChangedEvent {
                    post_id,
                    user_id,
                    from,
                    to,
                    timestamp: now,
                })
            }
        };
        self.ctx.publish(event);

        info!(
            post_id = %post_id,
            user_id = %user_id,
            change = ?outcome.change,
            "Reaction updated"
        );

        let mut tokens_awarded = 0;
        if reward {
            let amount = u64::from(FIRST_REACTION_REWARD);
            match self
                .ctx
                .user_repo()
                .credit_tokens(post.author_id, amount)
                .await
            {
                Ok(balance) => {
                    tokens_awarded = amount;
                    self.ctx.publish(DomainEvent::TokensCredited(TokensCreditedEvent {
                        user_id: post.author_id,
                        post_id: Some(post_id),
                        amount,
                        balance,
                        reason: TokensReason::ReactionReceived,
                        timestamp: now,
                    }));
                }
                Err(e) => {
                    // The reactor is already recorded as rewarded; never retried
                    warn!(
                        post_id = %post_id,
                        author_id = %post.author_id,
                        user_id = %user_id,
                        error = %e,
                        "Reaction reward lost"
                    );
                }
            }
        }

        ReactionResponse {
            reaction_counts: outcome.state.reaction_counts,
            my_reaction: outcome.change.current(),
            tokens_awarded,
        }
    }
}
