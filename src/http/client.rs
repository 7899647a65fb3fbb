//! The authenticated API client
//!
//! Wraps a reqwest pipeline with bearer-token attachment, a single
//! transparent token refresh on 401, and bounded exponential backoff on
//! 429. Recovered failures are invisible to callers; unrecovered ones
//! perform their documented side effect (notification, session wipe,
//! redirect) exactly once and then propagate.

use super::retry::{parse_retry_after, RetryContext, RetryPolicy};
use crate::auth::{is_auth_page, is_auth_route, TokenRefresher, LOGIN_PAGE};
use crate::environment::Environment;
use crate::error::{Error, Result};
use crate::session::SessionStore;
use crate::types::{error_message, JsonValue};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Backend origin, e.g. `https://api.gigpoint.io`
    pub origin: String,
    /// Request timeout
    pub timeout: Duration,
    /// Whether to carry cookies on every request. Required for the
    /// http-only refresh-token cookie round trip.
    pub send_credentials: bool,
    /// Retry bounds
    pub retry: RetryPolicy,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            origin: "http://localhost:5000".to_string(),
            timeout: Duration::from_secs(30),
            send_credentials: true,
            retry: RetryPolicy::default(),
            default_headers: HashMap::new(),
            user_agent: format!("gigpoint-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ApiClientConfig {
    /// Create a new config builder
    pub fn builder() -> ApiClientConfigBuilder {
        ApiClientConfigBuilder::default()
    }
}

/// Builder for API client config
#[derive(Default)]
pub struct ApiClientConfigBuilder {
    config: ApiClientConfig,
}

impl ApiClientConfigBuilder {
    /// Set the backend origin
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.config.origin = origin.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set whether cookies ride along with every request
    pub fn send_credentials(mut self, send: bool) -> Self {
        self.config.send_credentials = send;
        self
    }

    /// Set retry bounds
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.config.retry = retry;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ApiClientConfig {
        self.config
    }
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters
    pub query: HashMap<String, String>,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body (JSON)
    pub body: Option<JsonValue>,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Authenticated HTTP client for the marketplace backend
pub struct ApiClient {
    client: Client,
    config: ApiClientConfig,
    store: Arc<dyn SessionStore>,
    environment: Arc<dyn Environment>,
    refresher: TokenRefresher,
}

impl ApiClient {
    /// Create a client over the given session store and environment.
    ///
    /// Validates the configured origin and builds the underlying
    /// transport with its cookie store (the refresh-token cookie lives
    /// there, shared with the refresher).
    pub fn new(
        config: ApiClientConfig,
        store: Arc<dyn SessionStore>,
        environment: Arc<dyn Environment>,
    ) -> Result<Self> {
        let origin = url::Url::parse(&config.origin)?;
        if !matches!(origin.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "origin must be http(s), got {}",
                origin.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .cookie_store(config.send_credentials)
            .build()?;

        let refresher = TokenRefresher::new(client.clone(), &config.origin);

        Ok(Self {
            client,
            config,
            store,
            environment,
            refresher,
        })
    }

    /// The injected session store
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// The injected environment
    pub fn environment(&self) -> &Arc<dyn Environment> {
        &self.environment
    }

    /// The client configuration
    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        self.request(Method::GET, path, RequestConfig::default())
            .await
    }

    /// Make a GET request with config
    pub async fn get_with_config(&self, path: &str, config: RequestConfig) -> Result<Response> {
        self.request(Method::GET, path, config).await
    }

    /// Make a POST request with a JSON body
    pub async fn post(&self, path: &str, body: JsonValue) -> Result<Response> {
        self.request(Method::POST, path, RequestConfig::default().json(body))
            .await
    }

    /// Make a PUT request with a JSON body
    pub async fn put(&self, path: &str, body: JsonValue) -> Result<Response> {
        self.request(Method::PUT, path, RequestConfig::default().json(body))
            .await
    }

    /// Make a PATCH request with a JSON body
    pub async fn patch(&self, path: &str, body: JsonValue) -> Result<Response> {
        self.request(Method::PATCH, path, RequestConfig::default().json(body))
            .await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<Response> {
        self.request(Method::DELETE, path, RequestConfig::default())
            .await
    }

    /// Make a GET request and decode the JSON response
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request_json(Method::GET, path, RequestConfig::default())
            .await
    }

    /// Make a POST request and decode the JSON response
    pub async fn post_json<T: DeserializeOwned>(&self, path: &str, body: JsonValue) -> Result<T> {
        self.request_json(Method::POST, path, RequestConfig::default().json(body))
            .await
    }

    /// Make a request and decode the JSON response
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        config: RequestConfig,
    ) -> Result<T> {
        let response = self.request(method, path, config).await?;
        let json: T = response.json().await.map_err(Error::Http)?;
        Ok(json)
    }

    /// Make a generic request, running the full decision state machine.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        config: RequestConfig,
    ) -> Result<Response> {
        let full_url = self.build_url(path);
        let auth_route = is_auth_route(path);
        let timeout = config.timeout.unwrap_or(self.config.timeout);
        let mut ctx = RetryContext::new();

        loop {
            // Decoration reads the store at attempt time, so a retry
            // issued after a refresh picks up the new token.
            let attempt_token = self.store.access_token();

            let result = self
                .send_once(&method, &full_url, &config, timeout, attempt_token.as_deref())
                .await;

            let response = match result {
                Ok(response) => response,
                Err(e) => {
                    // No response at all: propagate silently, the caller
                    // owns transport-level failures.
                    if e.is_timeout() {
                        return Err(Error::Timeout {
                            timeout_ms: timeout.as_millis() as u64,
                        });
                    }
                    return Err(Error::Http(e));
                }
            };

            let status = response.status();

            if status.is_success() {
                debug!("{} {} -> {}", method, full_url, status.as_u16());
                return Ok(response);
            }

            if status == StatusCode::UNAUTHORIZED && !auth_route && !ctx.auth_retried() {
                ctx = ctx.with_auth_retry();
                match self
                    .refresher
                    .refresh(self.store.as_ref(), attempt_token.as_deref())
                    .await
                {
                    Ok(_) => {
                        warn!("{} {} -> 401, retrying with refreshed token", method, full_url);
                        continue;
                    }
                    Err(e) => {
                        self.expire_session();
                        return Err(e);
                    }
                }
            }

            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after =
                    parse_retry_after(response.headers(), self.config.retry.fallback_retry_after);

                if ctx.rate_limit_attempts() < self.config.retry.max_rate_limit_retries {
                    let delay = self
                        .config
                        .retry
                        .backoff_delay(retry_after, ctx.rate_limit_attempts());
                    warn!(
                        "{} {} -> 429, attempt {}/{}, waiting {:?}",
                        method,
                        full_url,
                        ctx.rate_limit_attempts() + 1,
                        self.config.retry.max_rate_limit_retries,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    ctx = ctx.next_rate_limit_attempt();
                    continue;
                }

                let retry_after_seconds = retry_after.as_secs();
                self.environment.notify(&format!(
                    "Too many requests. Please wait {retry_after_seconds} seconds and try again."
                ));
                return Err(Error::RateLimited {
                    retry_after_seconds,
                });
            }

            // Everything else is terminal for this request.
            return Err(self.terminal_error(status, response).await);
        }
    }

    /// Build and send one attempt. Decoration only; no retry decisions.
    async fn send_once(
        &self,
        method: &Method,
        url: &str,
        config: &RequestConfig,
        timeout: Duration,
        token: Option<&str>,
    ) -> std::result::Result<Response, reqwest::Error> {
        let mut req = self.client.request(method.clone(), url);

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }
        for (key, value) in &config.headers {
            req = req.header(key.as_str(), value.as_str());
        }
        if !config.query.is_empty() {
            req = req.query(&config.query);
        }
        if let Some(ref body) = config.body {
            req = req.json(body);
        }
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        req = req.timeout(timeout);

        req.send().await
    }

    /// Classify a terminal non-2xx response: extract a message, notify
    /// for everything but 401s, and build the error.
    async fn terminal_error(&self, status: StatusCode, response: Response) -> Error {
        let fallback = status.canonical_reason().unwrap_or("Request failed");
        let body: Option<JsonValue> = response.json().await.ok();
        let message = error_message(body.as_ref(), fallback);

        // 401s stay quiet: either the refresh cycle already ran for this
        // request, or the caller (a login form) owns the failure.
        if status != StatusCode::UNAUTHORIZED {
            self.environment.notify(&message);
        }

        Error::http_status(status.as_u16(), message)
    }

    /// Wipe the local session and send the user to the login page,
    /// unless they are already on the login or signup page.
    fn expire_session(&self) {
        error!("token refresh failed, clearing session");
        self.store.clear();
        if !is_auth_page(&self.environment.current_path()) {
            self.environment.navigate(LOGIN_PAGE);
        }
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let base = self.config.origin.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("authenticated", &self.store.is_authenticated())
            .finish_non_exhaustive()
    }
}
