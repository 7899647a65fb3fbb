//! Auth endpoint and page paths

/// Login endpoint
pub const LOGIN_PATH: &str = "/api/auth/login";

/// Registration endpoint
pub const REGISTER_PATH: &str = "/api/auth/register";

/// Logout endpoint
pub const LOGOUT_PATH: &str = "/api/auth/logout";

/// Token refresh endpoint
pub const REFRESH_PATH: &str = "/api/auth/refresh";

/// Login page path (redirect target after session wipe)
pub const LOGIN_PAGE: &str = "/login";

/// Signup page path
pub const SIGNUP_PAGE: &str = "/signup";

/// Endpoints exempt from the 401-triggers-refresh behavior. A 401 from
/// one of these means bad credentials, not an expired session.
const AUTH_ROUTES: &[&str] = &[LOGIN_PATH, REGISTER_PATH];

/// Whether a request path targets an auth route.
///
/// Accepts bare paths (`/api/auth/login`) and absolute URLs; query
/// strings are ignored.
pub fn is_auth_route(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let path = path.trim_end_matches('/');
    AUTH_ROUTES
        .iter()
        .any(|route| path == *route || path.ends_with(route))
}

/// Whether an application page is the login or signup page. Used to
/// avoid redirect loops when a session wipe happens on those pages.
pub fn is_auth_page(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let path = path.trim_end_matches('/');
    path == LOGIN_PAGE || path == SIGNUP_PAGE
}
