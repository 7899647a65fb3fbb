//! Typed endpoint wrappers
//!
//! Thin, typed calls over `ApiClient` for the backend's auth surface.
//! These are the routes the interceptor exempts from the refresh cycle,
//! and the writers of the session store.

mod auth;

pub use auth::{AuthApi, AuthSession, Credentials, Registration};
