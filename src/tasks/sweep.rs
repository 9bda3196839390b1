//! Periodic Sweep Task
//!
//! Background task that periodically evicts stale state from a component.

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

// == Sweep Trait ==
/// A component holding state that must be evicted on a timer.
pub trait Sweep: Send + Sync + 'static {
    /// Human-readable name used in log lines.
    const NAME: &'static str;

    /// Evicts stale state and returns how many items were removed.
    fn sweep(&self) -> usize;
}

/// Shortest accepted sweep interval. Tokio rejects a zero period.
const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);
/// Longest accepted sweep interval.
const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

fn bounded_interval(name: &str, interval: Duration) -> Duration {
    let bounded = interval.clamp(MIN_SWEEP_INTERVAL, MAX_SWEEP_INTERVAL);
    if bounded != interval {
        warn!(
            "{} sweep interval {:?} out of range, using {:?}",
            name, interval, bounded
        );
    }
    bounded
}

// == Sweep Task ==
/// Handle to a running sweeper.
///
/// Dropping the handle cancels the task; [`SweepTask::shutdown`] cancels it
/// and waits for it to finish.
#[derive(Debug)]
pub struct SweepTask {
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl SweepTask {
    /// Cancels the task and waits for it to exit.
    ///
    /// A sweep already in progress runs to completion first.
    pub async fn shutdown(mut self) {
        self.token.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }

    /// Returns true once the task has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for SweepTask {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Spawns a background task that calls [`Sweep::sweep`] every `interval`.
///
/// The first sweep happens one interval after spawning. The task only holds
/// a weak reference to `target` and exits on its own once the component has
/// been dropped.
///
/// # Arguments
/// * `target` - Shared component to sweep
/// * `interval` - Time between sweeps
///
/// # Example
/// ```ignore
/// let cache = Arc::new(TtlCache::new());
/// let sweeper = spawn_sweeper(&cache, Duration::from_secs(300));
/// // Later, during shutdown:
/// sweeper.shutdown().await;
/// ```
pub fn spawn_sweeper<S: Sweep>(target: &Arc<S>, interval: Duration) -> SweepTask {
    let interval = bounded_interval(S::NAME, interval);
    let token = CancellationToken::new();
    let weak: Weak<S> = Arc::downgrade(target);
    let cancelled = token.clone();

    let handle = tokio::spawn(async move {
        info!(
            "Starting {} sweep task with interval of {:?}",
            S::NAME,
            interval
        );

        let now = tokio::time::Instant::now();
        let start = now.checked_add(interval).unwrap_or(now);
        let mut ticker = tokio::time::interval_at(start, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancelled.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let Some(target) = weak.upgrade() else {
                debug!("{} dropped, stopping sweep task", S::NAME);
                break;
            };

            let removed = target.sweep();
            if removed > 0 {
                info!("{} sweep: removed {} stale entries", S::NAME, removed);
            } else {
                debug!("{} sweep: nothing to remove", S::NAME);
            }
        }

        debug!("{} sweep task stopped", S::NAME);
    });

    SweepTask {
        token,
        handle: Some(handle),
    }
}
