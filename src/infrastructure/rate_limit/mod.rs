//! Per-client submission rate limiting.
//!
//! Provides a [`RateLimiter`] trait with two implementations:
//! - [`RedisRateLimiter`] - Shared sliding window in Redis
//! - [`LocalRateLimiter`] - In-process fallback

mod local_limiter;
mod redis_limiter;
mod service;

pub use local_limiter::{LocalRateLimiter, SWEEP_THRESHOLD};
pub use redis_limiter::RedisRateLimiter;
pub use service::{
    DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW, RateDecision, RateLimitError, RateLimitPolicy,
    RateLimiter,
};
