//! Authenticated HTTP client
//!
//! The crate's core: a client that issues requests to the marketplace
//! backend, transparently attaching the bearer token, refreshing an
//! expired session at most once per request, and absorbing rate-limit
//! rejections with bounded exponential backoff.
//!
//! # Per-request state machine
//!
//! ```text
//! ISSUED → (2xx) → DONE(success)
//! ISSUED → (401, not auth route, not yet retried) → REFRESHING
//!             → (refresh ok)   → REISSUED → DONE(success|error)
//!             → (refresh fail) → DONE(error) + session cleared + redirect
//! ISSUED → (429, retries remaining) → WAITING → REISSUED
//! ISSUED → (429, retries exhausted) → DONE(error, notified)
//! ISSUED → (other status/error)     → DONE(error)
//! ```

mod client;
mod retry;

pub use client::{ApiClient, ApiClientConfig, ApiClientConfigBuilder, RequestConfig};
pub use retry::{parse_retry_after, RetryContext, RetryPolicy};
