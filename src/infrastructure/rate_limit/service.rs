//! Rate limiter trait and shared types.

use crate::domain::ClientKey;
use async_trait::async_trait;
use std::time::Duration;

/// Default number of submissions allowed per window.
pub const DEFAULT_MAX_REQUESTS: u32 = 5;

/// Default sliding window length.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Errors raised while setting up a rate-limit backend.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Rate limit backend connection error: {0}")]
    Connection(String),
}

/// Limit and window shared by every backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub max_requests: u32,
    pub window: Duration,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_MAX_REQUESTS,
            window: DEFAULT_WINDOW,
        }
    }
}

/// Result of a single rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed,
    Limited { retry_after_secs: u64 },
}

impl RateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateDecision::Allowed)
    }
}

/// Sliding-window limiter keyed by client.
///
/// Implementations must let [`ClientKey::UNKNOWN`] through unconditionally
/// and must never fail a check: backend trouble degrades to
/// [`RateDecision::Allowed`].
///
/// # Implementations
///
/// - [`crate::infrastructure::rate_limit::LocalRateLimiter`] - In-process map
/// - [`crate::infrastructure::rate_limit::RedisRateLimiter`] - Redis sorted-set log
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Records a request for `key` if it fits in the window.
    async fn check(&self, key: &ClientKey) -> RateDecision;

    /// Short backend name for logs and the health endpoint.
    fn backend(&self) -> &'static str;

    /// Checks if the backend is reachable.
    async fn health_check(&self) -> bool;
}

/// Whole seconds until `remaining` elapses, never less than one.
pub(crate) fn retry_after_secs(remaining: Duration) -> u64 {
    let millis = remaining.as_millis();
    let secs = millis.div_ceil(1000);
    u64::try_from(secs).unwrap_or(u64::MAX).max(1)
}
