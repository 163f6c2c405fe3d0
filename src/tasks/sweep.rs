//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries, bounding
//! memory held by keys that are written once and never read again.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::cache::ApiCache;

/// Spawns a task that calls `clear_expired` on `cache` every `interval`.
///
/// The first sweep happens one full interval after spawning. A zero interval
/// is raised to one second. The returned handle should be aborted on shutdown.
///
/// # Example
/// ```ignore
/// let cache: ApiCache<Value> = ApiCache::new(50, Duration::from_secs(300));
/// let sweep_handle = spawn_sweep_task(cache.clone(), Duration::from_secs(600));
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task<V>(cache: ApiCache<V>, interval: Duration) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    let interval = if interval.is_zero() {
        warn!("Cache sweep interval of zero, using 1 second");
        Duration::from_secs(1)
    } else {
        interval
    };

    tokio::spawn(async move {
        info!(
            "Starting cache sweep task with interval of {} seconds",
            interval.as_secs()
        );

        let now = tokio::time::Instant::now();
        let start = now.checked_add(interval).unwrap_or(now);
        let mut ticker = tokio::time::interval_at(start, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let removed = cache.clear_expired().await;

            if removed > 0 {
                info!("Cache cleanup: removed {} expired entries", removed);
            } else {
                debug!("Cache cleanup: no expired entries found");
            }
        }
    })
}
