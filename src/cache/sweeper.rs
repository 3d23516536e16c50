use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use super::TtlCache;

/// Periodically drops expired entries so keys that are never read again do
/// not linger past their TTL. Runs until the task is aborted.
pub async fn run_cache_sweeper(cache: Arc<TtlCache>, every: Duration) -> Result<(), anyhow::Error> {
    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // the first tick completes immediately
    ticker.tick().await;

    loop {
        ticker.tick().await;

        let removed = cache.purge_expired();
        if removed > 0 {
            tracing::debug!(removed, remaining = cache.len(), "Swept expired cache entries");
        }
    }
}
