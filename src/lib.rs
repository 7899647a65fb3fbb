//! # GigPoint client
//!
//! Rust client SDK for the GigPoint freelance-project marketplace API.
//!
//! The crate centers on [`http::ApiClient`], which wraps every request
//! to the backend with:
//!
//! - **Bearer attachment**: the session's access token rides along on
//!   each request, read from an injected [`session::SessionStore`]
//! - **Transparent refresh**: a 401 outside the auth routes triggers at
//!   most one refresh-and-retry per request, with concurrent failures
//!   coalescing onto a single in-flight refresh
//! - **Rate-limit backoff**: 429s are retried up to twice with
//!   exponential backoff derived from the server's Retry-After hint
//!
//! Unrecovered errors surface through an injected
//! [`environment::Environment`] (notification, login redirect) and then
//! propagate to the caller.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gigpoint_client::api::{AuthApi, Credentials};
//! use gigpoint_client::environment::NullEnvironment;
//! use gigpoint_client::http::{ApiClient, ApiClientConfig};
//! use gigpoint_client::session::MemorySessionStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> gigpoint_client::Result<()> {
//!     let config = ApiClientConfig::builder()
//!         .origin("https://api.gigpoint.io")
//!         .build();
//!     let client = ApiClient::new(
//!         config,
//!         Arc::new(MemorySessionStore::new()),
//!         Arc::new(NullEnvironment),
//!     )?;
//!
//!     AuthApi::new(&client)
//!         .login(&Credentials {
//!             email: "me@example.com".into(),
//!             password: "secret".into(),
//!         })
//!         .await?;
//!
//!     // Expired sessions and rate limits are handled on the way.
//!     let projects = client.get("/api/projects").await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and the backend response envelope
pub mod types;

/// Host environment abstraction (notifications, navigation)
pub mod environment;

/// Session store (access token, cached user identity)
pub mod session;

/// Token refresh and auth route classification
pub mod auth;

/// The authenticated HTTP client
pub mod http;

/// Typed endpoint wrappers
pub mod api;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use http::{ApiClient, ApiClientConfig, RequestConfig};
pub use session::{MemorySessionStore, SessionStore};
pub use types::{ApiEnvelope, UserProfile};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
