//! Scheduled refresh: a cancellable interval task.
//!
//! Freshness (new pending requests, resolved approvals, incoming
//! support messages) comes from polling. The loop is injected with an
//! async callback so tests drive ticks deterministically by calling
//! the callback directly instead of waiting on real timers.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Default interval between refresh ticks.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(15);

/// Run `tick` on a fixed interval until `cancel` is triggered.
///
/// The first tick fires immediately (tokio interval semantics), so a
/// freshly-opened view does not wait a full period for data. A tick's
/// own errors are its business; the loop never stops on its own.
pub async fn run_refresh_loop<F, Fut>(interval: Duration, cancel: CancellationToken, mut tick: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    tracing::info!(interval_secs = interval.as_secs(), "Refresh loop started");

    let mut timer = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Refresh loop stopping");
                break;
            }
            _ = timer.tick() => {
                tick().await;
            }
        }
    }
}
