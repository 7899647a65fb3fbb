//! Retry policy and per-request retry state
//!
//! Retry state is threaded through the request loop as an immutable
//! value. Each scheduled retry derives a new context; nothing is mutated
//! on a shared request object, so concurrent requests can never alias
//! each other's counters.

use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use std::time::Duration;

/// Bounds for the client's retry behavior
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum rate-limit retries per request (3 attempts total)
    pub max_rate_limit_retries: u32,
    /// Wait used when the server sends no usable Retry-After hint
    pub fallback_retry_after: Duration,
    /// Cap on any single backoff wait
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_rate_limit_retries: 2,
            fallback_retry_after: Duration::from_secs(15),
            max_backoff: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Delay before re-issuing after the given rate-limit attempt:
    /// the server's hint doubled per attempt, capped at `max_backoff`.
    pub fn backoff_delay(&self, retry_after: Duration, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        std::cmp::min(retry_after.saturating_mul(factor), self.max_backoff)
    }
}

/// Immutable snapshot of a request's retry history
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryContext {
    auth_retried: bool,
    rate_limit_attempts: u32,
}

impl RetryContext {
    /// Fresh context for a newly issued request
    pub fn new() -> Self {
        Self::default()
    }

    /// Has this request already spent its single refresh attempt
    pub fn auth_retried(&self) -> bool {
        self.auth_retried
    }

    /// Rate-limit retries already performed for this request
    pub fn rate_limit_attempts(&self) -> u32 {
        self.rate_limit_attempts
    }

    /// Context after spending the refresh attempt
    #[must_use]
    pub fn with_auth_retry(self) -> Self {
        Self {
            auth_retried: true,
            ..self
        }
    }

    /// Context after scheduling one more rate-limit retry
    #[must_use]
    pub fn next_rate_limit_attempt(self) -> Self {
        Self {
            rate_limit_attempts: self.rate_limit_attempts + 1,
            ..self
        }
    }
}

/// Parse the Retry-After header from a 429 response.
///
/// Accepts delay-seconds and HTTP-date forms; anything absent or
/// unparseable yields the fallback.
pub fn parse_retry_after(headers: &HeaderMap, fallback: Duration) -> Duration {
    let Some(raw) = headers.get("retry-after").and_then(|v| v.to_str().ok()) else {
        return fallback;
    };

    if let Ok(secs) = raw.trim().parse::<u64>() {
        return Duration::from_secs(secs);
    }

    if let Ok(date) = DateTime::parse_from_rfc2822(raw.trim()) {
        let delta = date.with_timezone(&Utc) - Utc::now();
        if let Ok(wait) = delta.to_std() {
            return wait;
        }
        // Date in the past: retry immediately
        return Duration::ZERO;
    }

    fallback
}
