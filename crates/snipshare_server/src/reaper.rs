//! Background sweep that purges expired shares on a fixed interval.
//!
//! Reads already hide and delete expired rows lazily; the reaper only bounds
//! how long unread expired rows stay on disk.

use snipshare_core::ShareRegistry;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Run one purge pass, logging instead of propagating failures.
///
/// # Returns
/// Number of rows removed, or `0` when the purge failed.
pub fn reap_once(registry: &ShareRegistry) -> usize {
    match registry.purge_expired() {
        Ok(purged) => purged,
        Err(err) => {
            tracing::error!("Expired share purge failed: {}", err);
            0
        }
    }
}

/// Spawn the periodic reaper on the current tokio runtime.
///
/// The first sweep runs immediately. Abort the returned handle to stop it.
///
/// # Arguments
/// - `registry`: Shared registry to sweep.
/// - `interval`: Delay between sweeps; must be non-zero.
pub fn spawn_reaper(registry: Arc<ShareRegistry>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let registry = registry.clone();
            match tokio::task::spawn_blocking(move || reap_once(&registry)).await {
                Ok(purged) if purged > 0 => {
                    tracing::debug!("Reaper removed {} expired share(s)", purged);
                }
                Ok(_) => {}
                Err(err) => tracing::error!("Reaper task failed: {}", err),
            }
        }
    })
}
