//! Redis-backed sliding-window rate limiter.

use super::service::{RateDecision, RateLimitError, RateLimitPolicy, RateLimiter, retry_after_secs};
use crate::domain::ClientKey;
use async_trait::async_trait;
use chrono::Utc;
use redis::{AsyncCommands, Client, Script, aio::ConnectionManager};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{info, warn};

/// Sliding-window log over a sorted set of request timestamps (ms).
///
/// Returns `{allowed, reset_at_ms}`. `reset_at_ms` is when the oldest
/// retained request leaves the window.
const SLIDING_WINDOW_SCRIPT: &str = r"
local key = KEYS[1]
local now = tonumber(ARGV[1])
local window = tonumber(ARGV[2])
local limit = tonumber(ARGV[3])

redis.call('ZREMRANGEBYSCORE', key, '-inf', now - window)

local count = redis.call('ZCARD', key)
if count >= limit then
  local oldest = redis.call('ZRANGE', key, 0, 0, 'WITHSCORES')
  return {0, tonumber(oldest[2]) + window}
end

redis.call('ZADD', key, now, ARGV[4])
redis.call('PEXPIRE', key, window)
return {1, now + window}
";

/// Rate limiter shared by every replica through Redis.
///
/// The script runs atomically on the server, so concurrent checks from
/// several processes cannot over-admit. Redis errors during a check are
/// logged and the request is let through.
pub struct RedisRateLimiter {
    client: ConnectionManager,
    policy: RateLimitPolicy,
    script: Script,
    key_prefix: String,
    sequence: AtomicU64,
}

impl RedisRateLimiter {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitError::Connection`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, policy: RateLimitPolicy) -> Result<Self, RateLimitError> {
        info!("Connecting to Redis rate limit backend");

        let client = Client::open(redis_url).map_err(|e| {
            RateLimitError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            RateLimitError::Connection(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| RateLimitError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            policy,
            script: Script::new(SLIDING_WINDOW_SCRIPT),
            key_prefix: "ratelimit:contact:".to_string(),
            sequence: AtomicU64::new(0),
        })
    }

    fn build_key(&self, key: &ClientKey) -> String {
        format!("{}{}", self.key_prefix, key)
    }

    /// Sorted-set member; unique even when two checks share a millisecond.
    fn member(&self, now_ms: i64) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}-{}", now_ms, std::process::id(), seq)
    }
}

/// Converts the script's reset timestamp into a `Retry-After` value.
fn retry_after_from_reset(reset_at_ms: i64, now_ms: i64) -> u64 {
    let remaining = u64::try_from(reset_at_ms.saturating_sub(now_ms)).unwrap_or(0);
    retry_after_secs(Duration::from_millis(remaining))
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    async fn check(&self, key: &ClientKey) -> RateDecision {
        if key.is_unknown() {
            return RateDecision::Allowed;
        }

        let now_ms = Utc::now().timestamp_millis();
        let window_ms = i64::try_from(self.policy.window.as_millis()).unwrap_or(i64::MAX);
        let mut conn = self.client.clone();

        let result: redis::RedisResult<(i64, i64)> = self
            .script
            .key(self.build_key(key))
            .arg(now_ms)
            .arg(window_ms)
            .arg(self.policy.max_requests)
            .arg(self.member(now_ms))
            .invoke_async(&mut conn)
            .await;

        match result {
            Ok((1, _)) => RateDecision::Allowed,
            Ok((_, reset_at_ms)) => RateDecision::Limited {
                retry_after_secs: retry_after_from_reset(reset_at_ms, now_ms),
            },
            Err(e) => {
                warn!("Redis rate limit check failed, allowing request: {}", e);
                RateDecision::Allowed
            }
        }
    }

    fn backend(&self) -> &'static str {
        "redis"
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
