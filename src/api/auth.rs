//! Auth endpoint wrappers

use crate::auth::{extract_access_token, LOGIN_PATH, LOGOUT_PATH, REGISTER_PATH};
use crate::error::{Error, Result};
use crate::http::ApiClient;
use crate::session::SessionStore;
use crate::types::{JsonValue, UserProfile};
use serde::Serialize;
use serde_json::json;
use tracing::warn;

/// Login request body
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

/// Registration request body
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    /// Display name
    pub name: String,
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
    /// Requested role (client or freelancer)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Result of a successful login or registration
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// The access token now held in the session store
    pub token: String,
    /// The authenticated user, when the backend includes one
    pub user: Option<UserProfile>,
}

/// Auth operations over an `ApiClient`.
///
/// Successful calls write the access token (and user, when present)
/// into the client's session store; the refresh-token cookie is set by
/// the server and handled by the transport.
pub struct AuthApi<'c> {
    client: &'c ApiClient,
}

impl<'c> AuthApi<'c> {
    /// Wrap a client
    pub fn new(client: &'c ApiClient) -> Self {
        Self { client }
    }

    /// Log in with email and password.
    ///
    /// A 401 here means bad credentials (the route is exempt from the
    /// refresh cycle) and comes back as `Error::Auth`.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthSession> {
        let body = serde_json::to_value(credentials)?;
        self.establish_session(LOGIN_PATH, body).await
    }

    /// Register a new account. The backend logs the account in on
    /// success, so this establishes a session the same way login does.
    pub async fn register(&self, registration: &Registration) -> Result<AuthSession> {
        let body = serde_json::to_value(registration)?;
        self.establish_session(REGISTER_PATH, body).await
    }

    /// Log out. The server call is best-effort; the local session is
    /// wiped regardless of its outcome.
    pub async fn logout(&self) -> Result<()> {
        let result = self.client.post(LOGOUT_PATH, json!({})).await;
        self.client.session().clear();
        if let Err(e) = result {
            warn!("server-side logout failed: {e}");
        }
        Ok(())
    }

    async fn establish_session(&self, path: &str, body: JsonValue) -> Result<AuthSession> {
        let response = match self.client.post(path, body).await {
            Err(Error::HttpStatus {
                status: 401,
                message,
            }) => return Err(Error::auth(message)),
            other => other?,
        };

        let body: JsonValue = response.json().await.map_err(Error::Http)?;

        let token = extract_access_token(&body)
            .ok_or_else(|| Error::auth("auth response carried no token"))?;
        self.client.session().set_access_token(token.clone());

        let user = body
            .pointer("/data/user")
            .or_else(|| body.get("user"))
            .and_then(|v| serde_json::from_value::<UserProfile>(v.clone()).ok());
        if let Some(ref user) = user {
            self.client.session().set_user(user.clone());
        }

        Ok(AuthSession { token, user })
    }
}
