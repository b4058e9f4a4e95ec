//! Sliding-window request limiter keyed by a caller-supplied identifier.
//!
//! Each key keeps the timestamps of its recently permitted calls. A call is
//! allowed while fewer than `max_requests` of those fall inside the trailing
//! window; denied calls are not recorded. Keys whose timestamps have all
//! expired are dropped by [`SlidingWindowLimiter::sweep_at`], which the
//! server runs periodically via [`SlidingWindowLimiter::spawn_sweeper`].

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tokio::task::JoinHandle;
use tracing::debug;

/// Lower bound on the sweep period; `tokio::time::interval` rejects zero.
const MIN_SWEEP_PERIOD: Duration = Duration::from_millis(1);

pub struct SlidingWindowLimiter {
    max_requests: usize,
    window: Duration,
    /// Per-key timestamps, oldest first. The DashMap shard lock makes each
    /// key's prune/count/record sequence atomic.
    ledger: DashMap<String, VecDeque<Instant>>,
}

impl SlidingWindowLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            ledger: DashMap::new(),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Returns `true` and records the call if `key` is under its limit.
    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    pub fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut stamps = self.ledger.entry(key.to_owned()).or_default();
        prune(&mut stamps, now, self.window);

        if stamps.len() >= self.max_requests {
            return false;
        }
        stamps.push_back(now);
        true
    }

    /// Drops every key with no timestamp left inside the window.
    /// Returns how many keys were removed.
    pub fn sweep_at(&self, now: Instant) -> usize {
        let before = self.ledger.len();
        self.ledger.retain(|_, stamps| {
            prune(stamps, now, self.window);
            !stamps.is_empty()
        });
        before.saturating_sub(self.ledger.len())
    }

    pub fn tracked_keys(&self) -> usize {
        self.ledger.len()
    }

    /// Runs [`Self::sweep_at`] every `every` (at least 1ms) on the tokio runtime.
    pub fn spawn_sweeper(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        let period = every.max(MIN_SWEEP_PERIOD);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let removed = self.sweep_at(Instant::now());
                if removed > 0 {
                    debug!(
                        removed,
                        remaining = self.tracked_keys(),
                        "Swept idle rate-limit keys"
                    );
                }
            }
        })
    }
}

/// Removes timestamps at or beyond `window` age, keeping `(now - window, now]`.
fn prune(stamps: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(oldest) = stamps.front() {
        if now.saturating_duration_since(*oldest) >= window {
            stamps.pop_front();
        } else {
            break;
        }
    }
}
