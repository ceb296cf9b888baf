//! Zerely worker entry point
//!
//! Run with:
//! ```bash
//! cargo run -p zerely-worker
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use zerely_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use zerely_db::MemoryStore;
use zerely_service::{spawn_expiry_sweeper, ServiceContext, ServiceContextBuilder};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "Worker failed");
        eprintln!("zerely-worker: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        app = %config.app.name,
        env = ?config.app.env,
        sweep_interval_secs = config.expiry.sweep_interval_secs,
        "Configuration loaded"
    );

    let period = config.expiry.sweep_interval();
    let ctx = ServiceContextBuilder::new()
        .memory_store(MemoryStore::new_shared())
        .config(config)
        .build()?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let event_log = spawn_event_log(&ctx, shutdown_rx.clone());
    let sweeper = spawn_expiry_sweeper(ctx, period, shutdown_rx);
    info!("Expiry sweeper started");

    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested");

    shutdown_tx.send(true).ok();
    sweeper.await?;
    event_log.await?;

    info!("Worker stopped");
    Ok(())
}

/// Log every published domain event until shutdown
fn spawn_event_log(ctx: &ServiceContext, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
    let mut events = ctx.subscribe();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                received = events.recv() => match received {
                    Ok(event) => debug!(
                        event_type = event.event_type(),
                        post_id = ?event.post_id(),
                        at = %event.timestamp(),
                        "Domain event"
                    ),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Event log fell behind");
                    }
                    Err(RecvError::Closed) => break,
                },
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
    })
}
