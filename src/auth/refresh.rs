//! Access-token refresh
//!
//! Handles the dedicated refresh call and extraction of the new access
//! token from the backend's response.

use super::routes::REFRESH_PATH;
use crate::error::{Error, Result};
use crate::session::SessionStore;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Performs the refresh round trip against `POST {origin}/api/auth/refresh`.
///
/// The call goes out on a bare client that shares the cookie store with
/// the intercepted client, so the http-only refresh-token cookie rides
/// along automatically; it is never routed through the interceptor and a
/// 401 from it can't recurse into another refresh.
///
/// Concurrent callers coalesce: the refresh is serialized behind a mutex,
/// and a caller that queued behind an already-successful refresh reuses
/// the token that refresh installed instead of issuing its own call.
pub struct TokenRefresher {
    http_client: Client,
    refresh_url: String,
    in_flight: Mutex<()>,
}

impl TokenRefresher {
    /// Create a refresher for the given origin, sharing the client (and
    /// its cookie store) used for intercepted requests.
    pub fn new(http_client: Client, origin: &str) -> Self {
        let base = origin.trim_end_matches('/');
        Self {
            http_client,
            refresh_url: format!("{base}{REFRESH_PATH}"),
            in_flight: Mutex::new(()),
        }
    }

    /// Obtain a fresh access token and install it in the store.
    ///
    /// `stale_token` is the token that just produced the 401 (if any).
    /// If the store already holds a different token by the time this
    /// caller gets its turn, another task refreshed first and that token
    /// is returned as-is.
    pub async fn refresh(&self, store: &dyn SessionStore, stale_token: Option<&str>) -> Result<String> {
        let _guard = self.in_flight.lock().await;

        // Double-check after acquiring the lock: a queued waiter may find
        // the refresh already done.
        if let Some(current) = store.access_token() {
            if stale_token != Some(current.as_str()) {
                debug!("token already refreshed by a concurrent request");
                return Ok(current);
            }
        }

        let token = self.fetch_new_token().await?;
        store.set_access_token(token.clone());
        debug!("access token refreshed");
        Ok(token)
    }

    /// Issue the refresh call and extract the new token.
    async fn fetch_new_token(&self) -> Result<String> {
        let response = self
            .http_client
            .post(&self.refresh_url)
            .send()
            .await
            .map_err(|e| Error::token_refresh(format!("refresh request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!("refresh endpoint returned {}", status.as_u16());
            return Err(Error::token_refresh(format!(
                "refresh endpoint returned status {}",
                status.as_u16()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| Error::token_refresh(format!("unreadable refresh response: {e}")))?;

        if !body.get("success").and_then(Value::as_bool).unwrap_or(false) {
            return Err(Error::token_refresh("refresh response not successful"));
        }

        extract_access_token(&body)
            .ok_or_else(|| Error::token_refresh("refresh response carried no usable token"))
    }
}

impl std::fmt::Debug for TokenRefresher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRefresher")
            .field("refresh_url", &self.refresh_url)
            .finish_non_exhaustive()
    }
}

/// Extract the access token from a refresh response body.
///
/// Compatibility shim: the backend has emitted the token at several
/// locations over time. Checked in fixed priority order, first present
/// value wins: top-level `token`, then `data.token`, then
/// `data.accessToken`.
pub fn extract_access_token(body: &Value) -> Option<String> {
    body.get("token")
        .and_then(Value::as_str)
        .or_else(|| body.pointer("/data/token").and_then(Value::as_str))
        .or_else(|| body.pointer("/data/accessToken").and_then(Value::as_str))
        .map(str::to_string)
}
