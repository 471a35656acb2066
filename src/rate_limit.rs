use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::metrics::TRACKED_CLIENTS;

// Per-key window state - tracks requests per IP/key
struct WindowState {
    window_start: u64, // epoch seconds
    count: u32,
}

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Admit,
    Reject,
}

/// Sliding-window rate limiter keyed by client identity.
///
/// One window per key, created lazily on first sight and reset in place once
/// the window expires. The map is sharded (DashMap), so checks for different
/// keys don't contend on a single lock, while the entry API keeps the
/// read-modify-write for one key atomic.
pub struct RateLimiter {
    entries: DashMap<String, WindowState>,
    max_requests: u32,
    window_secs: u64,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            entries: DashMap::new(),
            max_requests,
            window_secs,
        }
    }

    /// Checks whether a request from `key` is admitted right now.
    pub fn check(&self, key: &str) -> Decision {
        self.check_at(key, epoch_secs())
    }

    // The actual decision, taking the clock as an argument so tests can
    // drive window expiry deterministically.
    //
    // A window that is exactly `window_secs` old has NOT expired yet
    // (strictly greater-than), so the boundary second still counts toward
    // the old window. Inherited semantics; do not tighten to >=.
    fn check_at(&self, key: &str, now: u64) -> Decision {
        match self.entries.entry(key.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(WindowState {
                    window_start: now,
                    count: 1,
                });
                Decision::Admit
            }
            Entry::Occupied(mut slot) => {
                let state = slot.get_mut();
                if now.saturating_sub(state.window_start) > self.window_secs {
                    state.window_start = now;
                    state.count = 1;
                } else {
                    state.count += 1;
                }
                if state.count > self.max_requests {
                    Decision::Reject
                } else {
                    Decision::Admit
                }
            }
        }
    }

    /// Snapshot of all tracked keys and their current window counts.
    /// Iteration order of the underlying map, i.e. unspecified.
    pub fn report(&self) -> Vec<(String, u32)> {
        self.entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().count))
            .collect()
    }

    /// Number of keys currently tracked.
    pub fn tracked(&self) -> usize {
        self.entries.len()
    }

    /// Drops entries whose window expired more than `retention_secs` ago,
    /// bounding memory under high-cardinality traffic.
    pub fn sweep(&self, retention_secs: u64) {
        self.sweep_at(epoch_secs(), retention_secs);
    }

    fn sweep_at(&self, now: u64, retention_secs: u64) {
        self.entries.retain(|_, state| {
            now.saturating_sub(state.window_start) <= self.window_secs + retention_secs
        });
    }
}

fn epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Background task: periodically evict stale windows and refresh the
/// tracked-clients gauge.
pub async fn sweeper(limiter: Arc<RateLimiter>, interval: Duration, retention_secs: u64) {
    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;
        limiter.sweep(retention_secs);
        TRACKED_CLIENTS.set(limiter.tracked() as f64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn first_request_for_new_key_is_admitted() {
        let limiter = RateLimiter::new(60, 60);
        assert_eq!(limiter.check_at("1.1.1.1", 1000), Decision::Admit);
        assert_eq!(limiter.report(), vec![("1.1.1.1".to_string(), 1)]);
    }

    #[test]
    fn threshold_admits_exactly_max_requests() {
        let limiter = RateLimiter::new(60, 60);
        for _ in 0..60 {
            assert_eq!(limiter.check_at("1.1.1.1", 1000), Decision::Admit);
        }
        assert_eq!(limiter.check_at("1.1.1.1", 1000), Decision::Reject);
        assert_eq!(limiter.check_at("1.1.1.1", 1010), Decision::Reject);
    }

    #[test]
    fn window_resets_strictly_after_expiry() {
        let limiter = RateLimiter::new(60, 60);
        for _ in 0..61 {
            limiter.check_at("1.1.1.1", 1000);
        }
        // Exactly window_secs later is still inside the old window.
        assert_eq!(limiter.check_at("1.1.1.1", 1060), Decision::Reject);
        // One second past the boundary starts a fresh window with count 1.
        assert_eq!(limiter.check_at("1.1.1.1", 1061), Decision::Admit);
        assert_eq!(limiter.report(), vec![("1.1.1.1".to_string(), 1)]);
    }

    #[test]
    fn rejected_requests_still_count_toward_the_window() {
        let limiter = RateLimiter::new(2, 60);
        limiter.check_at("a", 1000);
        limiter.check_at("a", 1000);
        assert_eq!(limiter.check_at("a", 1000), Decision::Reject);
        assert_eq!(limiter.report(), vec![("a".to_string(), 3)]);
    }

    #[test]
    fn keys_are_isolated() {
        let limiter = RateLimiter::new(2, 60);
        assert_eq!(limiter.check_at("a", 1000), Decision::Admit);
        assert_eq!(limiter.check_at("a", 1000), Decision::Admit);
        assert_eq!(limiter.check_at("a", 1000), Decision::Reject);
        assert_eq!(limiter.check_at("b", 1000), Decision::Admit);

        let mut report = limiter.report();
        report.sort();
        assert_eq!(report, vec![("a".to_string(), 3), ("b".to_string(), 1)]);
    }

    #[test]
    fn concurrent_checks_lose_no_updates() {
        let limiter = Arc::new(RateLimiter::new(60, 60));
        let mut handles = Vec::new();
        for _ in 0..10 {
            let limiter = Arc::clone(&limiter);
            handles.push(thread::spawn(move || {
                let mut admitted = 0u32;
                for _ in 0..10 {
                    if limiter.check_at("9.9.9.9", 1000) == Decision::Admit {
                        admitted += 1;
                    }
                }
                admitted
            }));
        }
        let admitted: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();

        // 100 checks total: every increment lands, exactly 60 admits.
        assert_eq!(limiter.report(), vec![("9.9.9.9".to_string(), 100)]);
        assert_eq!(admitted, 60);
    }

    #[test]
    fn sweep_evicts_long_expired_windows_only() {
        let limiter = RateLimiter::new(60, 60);
        limiter.check_at("stale", 1000);
        limiter.check_at("fresh", 1400);
        limiter.sweep_at(1500, 300);
        assert_eq!(limiter.report(), vec![("fresh".to_string(), 1)]);
        // A swept key starts over as if never seen.
        assert_eq!(limiter.check_at("stale", 1500), Decision::Admit);
    }
}
