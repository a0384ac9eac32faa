//! TTL Cleanup Task
//!
//! Background task that periodically purges expired cache entries so they
//! stop occupying adapter space before anyone reads them.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::state::AppState;

/// Spawns a background task that periodically cleans up both caches.
///
/// Each run locks one cache at a time on the blocking pool, so a slow purge
/// of the token count cache never blocks comparison lookups.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cleanup_handle = spawn_cleanup_task(state.clone(), 60);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(state: AppState, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let comparisons = state.with_comparisons(|cache| cache.clean_expired()).await;
            let token_counts = state.with_token_counts(|cache| cache.clean_expired()).await;
            let (comparisons, token_counts) = match (comparisons, token_counts) {
                (Ok(comparisons), Ok(token_counts)) => (comparisons, token_counts),
                (Err(e), _) | (_, Err(e)) => {
                    warn!(error = %e, "TTL cleanup run failed");
                    continue;
                }
            };

            if comparisons + token_counts > 0 {
                info!(
                    comparisons,
                    token_counts, "TTL cleanup: removed expired entries"
                );
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}
