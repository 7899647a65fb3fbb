//! Session store trait and in-memory implementation

use crate::types::UserProfile;
use std::sync::RwLock;

/// Storage slot for the session's access token and cached user identity.
///
/// Writers: login, token refresh. Readers: the outbound decoration step
/// of every request. `clear` wipes everything at once; there is no
/// partial update of the token (it is either replaced whole or absent).
/// The only cross-request guarantee is last-write-wins.
pub trait SessionStore: Send + Sync {
    /// The current access token, if a session is active
    fn access_token(&self) -> Option<String>;

    /// Replace the access token
    fn set_access_token(&self, token: String);

    /// The cached user identity, if known
    fn user(&self) -> Option<UserProfile>;

    /// Replace the cached user identity
    fn set_user(&self, user: UserProfile);

    /// Wipe the whole session (token and user)
    fn clear(&self);

    /// Whether an access token is currently held
    fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }
}

/// Tab-scoped, non-persistent session store. The Rust analogue of the
/// original's browser session storage: process-local, gone on drop.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: RwLock<SessionState>,
}

#[derive(Debug, Default)]
struct SessionState {
    access_token: Option<String>,
    user: Option<UserProfile>,
}

impl MemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with an access token
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.set_access_token(token.into());
        store
    }
}

impl SessionStore for MemorySessionStore {
    fn access_token(&self) -> Option<String> {
        self.inner.read().expect("session lock").access_token.clone()
    }

    fn set_access_token(&self, token: String) {
        self.inner.write().expect("session lock").access_token = Some(token);
    }

    fn user(&self) -> Option<UserProfile> {
        self.inner.read().expect("session lock").user.clone()
    }

    fn set_user(&self, user: UserProfile) {
        self.inner.write().expect("session lock").user = Some(user);
    }

    fn clear(&self) {
        let mut inner = self.inner.write().expect("session lock");
        inner.access_token = None;
        inner.user = None;
    }
}
