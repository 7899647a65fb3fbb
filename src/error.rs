//! Error types for the GigPoint client
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the GigPoint client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid origin URL: {0}")]
    InvalidOrigin(#[from] url::ParseError),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("Token refresh failed: {message}")]
    TokenRefresh { message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Rate limited, retry after {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create a token refresh error
    pub fn token_refresh(message: impl Into<String>) -> Self {
        Self::TokenRefresh {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            message: message.into(),
        }
    }

    /// The HTTP status code carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::RateLimited { .. } => Some(429),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether this is a transport-level failure with no response
    /// (timeout, connect, DNS). These are never surfaced as notifications.
    pub fn is_network(&self) -> bool {
        match self {
            Error::Timeout { .. } => true,
            Error::Http(e) => e.status().is_none(),
            _ => false,
        }
    }

    /// Whether the session became unusable (refresh failed, wipe performed)
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Error::TokenRefresh { .. })
    }
}

/// Result type alias for the GigPoint client
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("missing origin");
        assert_eq!(err.to_string(), "Configuration error: missing origin");

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");

        let err = Error::RateLimited {
            retry_after_seconds: 15,
        };
        assert_eq!(err.to_string(), "Rate limited, retry after 15s");
    }

    #[test]
    fn test_status() {
        assert_eq!(Error::http_status(401, "").status(), Some(401));
        assert_eq!(
            Error::RateLimited {
                retry_after_seconds: 5
            }
            .status(),
            Some(429)
        );
        assert_eq!(Error::config("x").status(), None);
        assert_eq!(Error::Timeout { timeout_ms: 1000 }.status(), None);
    }

    #[test]
    fn test_is_network() {
        assert!(Error::Timeout { timeout_ms: 30000 }.is_network());
        assert!(!Error::http_status(500, "boom").is_network());
        assert!(!Error::token_refresh("expired").is_network());
    }

    #[test]
    fn test_is_session_expired() {
        assert!(Error::token_refresh("no usable token").is_session_expired());
        assert!(!Error::auth("bad credentials").is_session_expired());
        assert!(!Error::http_status(401, "").is_session_expired());
    }
}
