//! Reaper Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::SharedStore;

/// Spawns the reaper for one cache.
///
/// The first sweep happens one full `sweep_interval` after this call. Each
/// sweep takes a single timestamp, holds the write lock while it removes every
/// entry older than the TTL at that instant, then releases it. The sweep never
/// awaits, so a stop request is only ever observed between sweeps.
///
/// The task exits when `stop_rx` sees `true` or its sender is dropped.
///
/// # Example
/// ```ignore
/// let (stop_tx, stop_rx) = watch::channel(false);
/// let handle = spawn_reaper(shared.clone(), Duration::from_secs(10), stop_rx);
/// // Later:
/// stop_tx.send_replace(true);
/// handle.await?;
/// ```
pub(crate) fn spawn_reaper(
    shared: Arc<SharedStore>,
    sweep_interval: Duration,
    mut stop_rx: watch::Receiver<bool>,
) -> JoinHandle<()> {
    let first_sweep = Instant::now() + sweep_interval;

    tokio::spawn(async move {
        info!(
            "Starting cache reaper: ttl={}ms, sweep_interval={}ms",
            shared.ttl().as_millis(),
            sweep_interval.as_millis()
        );

        let mut ticker = time::interval_at(first_sweep, sweep_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                _ = stop_rx.wait_for(|stopped| *stopped) => break,

                _ = ticker.tick() => {
                    let (removed, remaining) = shared.sweep(Instant::now());

                    if removed > 0 {
                        info!("Cache sweep: removed {} expired entries, {} remaining", removed, remaining);
                    } else {
                        debug!("Cache sweep: no expired entries, {} remaining", remaining);
                    }
                }
            }
        }

        info!("Cache reaper stopped");
    })
}
