//! Expiry service
//!
//! Deletes posts whose auto-delete time has passed, either on demand or
//! from a background sweeper task.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, instrument, warn};

use zerely_core::events::PostExpiredEvent;
use zerely_core::DomainEvent;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Expiry service
pub struct ExpiryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ExpiryService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Delete every post due at `now`. Returns how many were removed.
    #[instrument(skip(self))]
    pub async fn sweep_expired(&self, now: DateTime<Utc>) -> ServiceResult<usize> {
        let expired = self.ctx.post_repo().find_expired(now).await?;
        let mut removed = 0;
        let mut comments_removed = 0;

        for post_id in expired {
            match self.ctx.post_repo().delete(post_id).await {
                Ok(()) => {
                    removed += 1;
                    comments_removed += self.ctx.comment_repo().delete_by_post(post_id).await?;
                    self.ctx.publish(DomainEvent::PostExpired(PostExpiredEvent {
                        post_id,
                        timestamp: now,
                    }));
                }
                // Deleted by its author since the scan
                Err(e) if e.is_not_found() => {}
                Err(e) => return Err(e.into()),
            }
        }

        if removed > 0 {
            info!(removed, comments_removed, "Expired posts deleted");
        }
        Ok(removed)
    }
}

/// Run [`ExpiryService::sweep_expired`] every `period` until `shutdown`
/// turns `true` or its sender is dropped
pub fn spawn_expiry_sweeper(
    ctx: ServiceContext,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = ExpiryService::new(&ctx).sweep_expired(Utc::now()).await {
                        warn!(error = %e, "Expiry sweep failed");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        debug!("Expiry sweeper stopped");
    })
}
