//! Rate limiter implementation
//!
//! Sliding window rate limiting keyed by client address.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

/// Requests allowed per client within a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub requests: u32,
    pub window: Duration,
}

impl RateLimitConfig {
    pub fn new(requests: u32, window: Duration) -> Self {
        Self { requests, window }
    }
}

/// Result of a rate limit check
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    /// Whether the request is allowed
    pub allowed: bool,
    /// Remaining requests in the current window
    pub remaining: u32,
    /// Total limit for the window
    pub limit: u32,
    /// Time until the oldest request leaves the window (in seconds)
    pub reset_in_seconds: u64,
}

/// Per-client sliding window rate limiter
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    /// Per-client request timestamps, oldest first
    records: Arc<RwLock<HashMap<String, VecDeque<Instant>>>>,
    cleanup_interval: Duration,
    last_cleanup: Arc<RwLock<Instant>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            records: Arc::new(RwLock::new(HashMap::new())),
            cleanup_interval: Duration::from_secs(300),
            last_cleanup: Arc::new(RwLock::new(Instant::now())),
        }
    }

    /// Check the limit for `client` and record the request if it is allowed
    pub async fn check_and_record(&self, client: &str) -> RateLimitResult {
        self.maybe_cleanup().await;

        let now = Instant::now();
        let window_start = now.checked_sub(self.config.window).unwrap_or(now);
        let limit = self.config.requests;

        let mut records = self.records.write().await;
        let timestamps = records.entry(client.to_string()).or_default();

        while timestamps.front().is_some_and(|t| *t < window_start) {
            timestamps.pop_front();
        }

        let count = timestamps.len() as u32;

        if count >= limit {
            let reset_in = timestamps
                .front()
                .map(|oldest| {
                    let elapsed = now.duration_since(*oldest);
                    self.config.window.as_secs().saturating_sub(elapsed.as_secs()).max(1)
                })
                .unwrap_or(self.config.window.as_secs());

            return RateLimitResult {
                allowed: false,
                remaining: 0,
                limit,
                reset_in_seconds: reset_in,
            };
        }

        timestamps.push_back(now);

        RateLimitResult {
            allowed: true,
            remaining: limit.saturating_sub(count + 1),
            limit,
            reset_in_seconds: self.config.window.as_secs(),
        }
    }

    async fn maybe_cleanup(&self) {
        let should_cleanup = {
            let last = self.last_cleanup.read().await;
            last.elapsed() >= self.cleanup_interval
        };

        if should_cleanup {
            let mut last = self.last_cleanup.write().await;
            *last = Instant::now();

            let now = Instant::now();
            let cutoff = now.checked_sub(self.config.window).unwrap_or(now);

            let mut records = self.records.write().await;

            for timestamps in records.values_mut() {
                timestamps.retain(|t| *t >= cutoff);
            }

            records.retain(|_, v| !v.is_empty());
        }
    }
}
