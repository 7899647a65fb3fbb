//! Common types used throughout the GigPoint client
//!
//! This module contains the backend response envelope, the cached user
//! identity, and shared type aliases used across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Response Envelope
// ============================================================================

/// The backend's standard response envelope.
///
/// Success responses carry `{ success, data?, message? }`; error bodies
/// generally carry only a `message`. The envelope is consumed, never
/// produced, by this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the backend considers the operation successful
    #[serde(default)]
    pub success: bool,
    /// Payload, when present
    #[serde(default)]
    pub data: Option<T>,
    /// Human-readable message, when present
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload, turning a missing body or `success: false`
    /// into an error carrying the envelope's message.
    pub fn into_data(self) -> crate::error::Result<T> {
        if !self.success {
            return Err(crate::error::Error::Other(
                self.message
                    .unwrap_or_else(|| "Request was not successful".to_string()),
            ));
        }
        self.data.ok_or_else(|| {
            crate::error::Error::Other("Response envelope carried no data".to_string())
        })
    }
}

/// Extract a human-readable message from a JSON error body.
///
/// Checks the envelope's top-level `message` field; callers supply the
/// fallback used when the body is absent or not shaped as expected.
pub fn error_message(body: Option<&JsonValue>, fallback: &str) -> String {
    body.and_then(|v| v.get("message"))
        .and_then(JsonValue::as_str)
        .map_or_else(|| fallback.to_string(), str::to_string)
}

// ============================================================================
// User Identity
// ============================================================================

/// The authenticated user's identity, as returned by login and cached in
/// the session store until logout or refresh failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Backend identifier
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Account email
    pub email: String,
    /// Role within the marketplace (client, freelancer, admin, agent)
    #[serde(default)]
    pub role: Option<String>,
}
