//! Sliding-Window Rate Limiter
//!
//! Tracks the raw request instants of every client inside a trailing window.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::tasks::Sweep;

// == Rate Limiter ==
/// Per-client sliding-window request counter.
///
/// A client is admitted while fewer than `limit` of its recorded requests fall
/// inside the trailing `window`. Rejected requests are not recorded, so a
/// client that keeps retrying is not locked out longer than the window.
#[derive(Debug)]
pub struct RateLimiter {
    windows: Mutex<HashMap<String, VecDeque<Instant>>>,
    limit: usize,
    window: Duration,
}

impl RateLimiter {
    // == Constructor ==
    /// Creates a limiter admitting `limit` requests per `window` per client.
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            limit,
            window,
        }
    }

    // == Is Allowed ==
    /// Checks whether `client_key` may make a request now, recording it if so.
    pub fn is_allowed(&self, client_key: &str) -> bool {
        self.is_allowed_at(client_key, Instant::now())
    }

    /// Admission check against an explicit clock reading.
    ///
    /// Only this client's window is pruned; other clients are left for the sweep.
    pub(crate) fn is_allowed_at(&self, client_key: &str, now: Instant) -> bool {
        let mut windows = self.lock();
        let timestamps = windows.entry(client_key.to_string()).or_default();

        while let Some(oldest) = timestamps.front() {
            if now.saturating_duration_since(*oldest) >= self.window {
                timestamps.pop_front();
            } else {
                break;
            }
        }

        if timestamps.len() >= self.limit {
            return false;
        }

        timestamps.push_back(now);
        true
    }

    // == Sweep ==
    /// Drops timestamps older than twice the window and forgets clients left
    /// with none.
    ///
    /// Returns the number of clients removed.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Instant::now())
    }

    pub(crate) fn sweep_at(&self, now: Instant) -> usize {
        let horizon = self.window.saturating_mul(2);
        let mut windows = self.lock();
        let before = windows.len();

        windows.retain(|_, timestamps| {
            timestamps.retain(|t| now.saturating_duration_since(*t) < horizon);
            !timestamps.is_empty()
        });

        before - windows.len()
    }

    // == Accessors ==
    /// Maximum requests admitted per window.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Length of the trailing window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Number of clients currently holding state.
    pub fn tracked_clients(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, VecDeque<Instant>>> {
        self.windows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Sweep for RateLimiter {
    const NAME: &'static str = "rate limiter";

    fn sweep(&self) -> usize {
        RateLimiter::sweep(self)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::thread::sleep;

    const WINDOW: Duration = Duration::from_secs(60);

    #[test]
    fn test_allows_up_to_limit() {
        let limiter = RateLimiter::new(3, WINDOW);
        let now = Instant::now();

        assert!(limiter.is_allowed_at("1.2.3.4", now));
        assert!(limiter.is_allowed_at("1.2.3.4", now + Duration::from_secs(1)));
        assert!(limiter.is_allowed_at("1.2.3.4", now + Duration::from_secs(2)));
        assert!(!limiter.is_allowed_at("1.2.3.4", now + Duration::from_secs(3)));
    }

    #[test]
    fn test_clients_are_independent() {
        let limiter = RateLimiter::new(1, WINDOW);
        let now = Instant::now();

        assert!(limiter.is_allowed_at("a", now));
        assert!(!limiter.is_allowed_at("a", now));
        assert!(limiter.is_allowed_at("b", now));
        assert_eq!(limiter.tracked_clients(), 2);
    }

    #[test]
    fn test_window_slides() {
        let limiter = RateLimiter::new(2, WINDOW);
        let start = Instant::now();

        assert!(limiter.is_allowed_at("c", start));
        assert!(limiter.is_allowed_at("c", start + Duration::from_secs(30)));
        assert!(!limiter.is_allowed_at("c", start + Duration::from_secs(59)));

        // The first request leaves the window exactly one window later
        assert!(limiter.is_allowed_at("c", start + WINDOW));
        // The second is still inside
        assert!(!limiter.is_allowed_at("c", start + WINDOW + Duration::from_secs(1)));
    }

    #[test]
    fn test_rejections_are_not_recorded() {
        let limiter = RateLimiter::new(1, WINDOW);
        let start = Instant::now();

        assert!(limiter.is_allowed_at("d", start));
        for i in 1..50 {
            assert!(!limiter.is_allowed_at("d", start + Duration::from_secs(i)));
        }

        // Only the admitted request counted, so admission resumes one window later
        assert!(limiter.is_allowed_at("d", start + WINDOW));
    }

    #[test]
    fn test_zero_limit_rejects_everything() {
        let limiter = RateLimiter::new(0, WINDOW);
        assert!(!limiter.is_allowed("e"));
    }

    #[test]
    fn test_real_clock_window() {
        let limiter = RateLimiter::new(2, Duration::from_millis(100));

        assert!(limiter.is_allowed("f"));
        assert!(limiter.is_allowed("f"));
        assert!(!limiter.is_allowed("f"));

        sleep(Duration::from_millis(130));

        assert!(limiter.is_allowed("f"));
    }

    #[test]
    fn test_sweep_keeps_buffer_of_two_windows() {
        let limiter = RateLimiter::new(10, WINDOW);
        let start = Instant::now();

        limiter.is_allowed_at("old", start);
        limiter.is_allowed_at("recent", start + Duration::from_secs(90));

        // 90s later "old" is 1.5 windows old: outside the strict window but
        // still inside the sweep buffer
        assert_eq!(limiter.sweep_at(start + Duration::from_secs(90)), 0);
        assert_eq!(limiter.tracked_clients(), 2);

        assert_eq!(limiter.sweep_at(start + Duration::from_secs(121)), 1);
        assert_eq!(limiter.tracked_clients(), 1);
    }

    #[test]
    fn test_sweep_prunes_partially() {
        let limiter = RateLimiter::new(10, WINDOW);
        let start = Instant::now();

        limiter.is_allowed_at("g", start);
        limiter.is_allowed_at("g", start + Duration::from_secs(100));

        assert_eq!(limiter.sweep_at(start + Duration::from_secs(130)), 0);
        assert_eq!(limiter.tracked_clients(), 1);
    }

    #[test]
    fn test_accessors() {
        let limiter = RateLimiter::new(100, WINDOW);
        assert_eq!(limiter.limit(), 100);
        assert_eq!(limiter.window(), WINDOW);
        assert_eq!(limiter.tracked_clients(), 0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        // N requests within one window are all admitted, the next is rejected,
        // and admission resumes one window after the first.
        #[test]
        fn prop_sliding_window_admission(
            limit in 1usize..50,
            spacing_ms in 0u64..100,
        ) {
            let window = Duration::from_secs(10);
            prop_assume!(spacing_ms * (limit as u64) < window.as_millis() as u64);
            let limiter = RateLimiter::new(limit, window);
            let start = Instant::now();

            for i in 0..limit {
                let at = start + Duration::from_millis(spacing_ms * i as u64);
                prop_assert!(limiter.is_allowed_at("client", at));
            }

            let last = start + Duration::from_millis(spacing_ms * limit as u64);
            prop_assert!(!limiter.is_allowed_at("client", last));
            prop_assert!(limiter.is_allowed_at("client", start + window));
        }

        // Any mix of admitted and rejected calls never records more than
        // `limit` timestamps inside one window.
        #[test]
        fn prop_never_exceeds_limit(
            limit in 1usize..20,
            offsets in prop::collection::vec(0u64..1000, 1..200),
        ) {
            let window = Duration::from_secs(1);
            let limiter = RateLimiter::new(limit, window);
            let start = Instant::now();
            let mut sorted = offsets;
            sorted.sort_unstable();
            let total = sorted.len();

            let mut admitted: Vec<u64> = Vec::new();
            for offset in sorted {
                if limiter.is_allowed_at("client", start + Duration::from_millis(offset)) {
                    admitted.push(offset);
                }
            }

            // Every offset is within one window of the start, so nothing is pruned
            prop_assert_eq!(admitted.len(), limit.min(total));
        }
    }
}
