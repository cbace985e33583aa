//! In-process sliding-window rate limiter.

use super::service::{RateDecision, RateLimitPolicy, RateLimiter, retry_after_secs};
use crate::domain::ClientKey;
use crate::infrastructure::clock::{Clock, SystemClock};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tracing::debug;

/// Key count above which idle entries are swept on the next check.
pub const SWEEP_THRESHOLD: usize = 1000;

/// Rate limiter backed by a mutex-guarded map of request instants.
///
/// Used when no Redis backend is configured, or when Redis is unreachable at
/// startup. State is per process, so several replicas each enforce their own
/// budget.
pub struct LocalRateLimiter {
    policy: RateLimitPolicy,
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl LocalRateLimiter {
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self::with_clock(policy, Arc::new(SystemClock))
    }

    pub fn with_clock(policy: RateLimitPolicy, clock: Arc<dyn Clock>) -> Self {
        debug!(
            max_requests = policy.max_requests,
            window_secs = policy.window.as_secs(),
            "Using local rate limiter"
        );
        Self {
            policy,
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Number of client keys currently tracked.
    pub fn tracked_keys(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn check_at(&self, key: &str, now: Instant) -> RateDecision {
        let window = self.policy.window;
        let cutoff = now.checked_sub(window);
        let is_live = |t: &Instant| cutoff.is_none_or(|c| *t > c);

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        if entries.len() > SWEEP_THRESHOLD {
            let before = entries.len();
            entries.retain(|_, stamps| stamps.iter().any(is_live));
            debug!(evicted = before - entries.len(), "Swept idle rate limit entries");
        }

        let stamps = entries.entry(key.to_string()).or_default();
        while stamps.front().is_some_and(|t| !is_live(t)) {
            stamps.pop_front();
        }

        if stamps.len() >= self.policy.max_requests as usize {
            let oldest = stamps.front().copied().unwrap_or(now);
            let remaining = window.saturating_sub(now.saturating_duration_since(oldest));
            return RateDecision::Limited {
                retry_after_secs: retry_after_secs(remaining),
            };
        }

        stamps.push_back(now);
        RateDecision::Allowed
    }
}

#[async_trait]
impl RateLimiter for LocalRateLimiter {
    async fn check(&self, key: &ClientKey) -> RateDecision {
        if key.is_unknown() {
            return RateDecision::Allowed;
        }
        self.check_at(key.as_str(), self.clock.now())
    }

    fn backend(&self) -> &'static str {
        "local"
    }

    async fn health_check(&self) -> bool {
        true
    }
}
