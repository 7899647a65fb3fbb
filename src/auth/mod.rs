//! Session authentication
//!
//! The refresh flow the client leans on when a request comes back 401:
//! a dedicated call to the refresh endpoint (outside the interceptor),
//! token extraction from the backend's envelope, and the auth-route
//! exemptions that keep login failures from looking like expired
//! sessions.

mod refresh;
mod routes;

pub use refresh::{extract_access_token, TokenRefresher};
pub use routes::{
    is_auth_page, is_auth_route, LOGIN_PAGE, LOGIN_PATH, LOGOUT_PATH, REFRESH_PATH, REGISTER_PATH,
    SIGNUP_PAGE,
};

#[cfg(test)]
mod tests;
