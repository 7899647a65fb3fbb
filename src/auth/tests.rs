//! Tests for the auth module

use super::*;
use crate::session::{MemorySessionStore, SessionStore};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Route classification
// ============================================================================

#[test]
fn test_auth_routes_detected() {
    assert!(is_auth_route("/api/auth/login"));
    assert!(is_auth_route("/api/auth/register"));
    assert!(is_auth_route("/api/auth/login?remember=true"));
    assert!(is_auth_route("https://api.gigpoint.io/api/auth/login"));
}

#[test]
fn test_non_auth_routes() {
    assert!(!is_auth_route("/api/auth/refresh"));
    assert!(!is_auth_route("/api/auth/logout"));
    assert!(!is_auth_route("/api/projects"));
    assert!(!is_auth_route("/api/bids/123"));
}

#[test]
fn test_auth_pages() {
    assert!(is_auth_page("/login"));
    assert!(is_auth_page("/signup"));
    assert!(is_auth_page("/login?next=/projects"));
    assert!(!is_auth_page("/projects"));
    assert!(!is_auth_page("/"));
}

// ============================================================================
// Token extraction
// ============================================================================

#[test]
fn test_extract_token_top_level() {
    let body = json!({"success": true, "token": "abc"});
    assert_eq!(extract_access_token(&body).as_deref(), Some("abc"));
}

#[test]
fn test_extract_token_nested() {
    let body = json!({"success": true, "data": {"token": "nested"}});
    assert_eq!(extract_access_token(&body).as_deref(), Some("nested"));

    let body = json!({"success": true, "data": {"accessToken": "camel"}});
    assert_eq!(extract_access_token(&body).as_deref(), Some("camel"));
}

#[test]
fn test_extract_token_priority_order() {
    // Top-level wins over both nested locations
    let body = json!({
        "token": "top",
        "data": {"token": "nested", "accessToken": "camel"}
    });
    assert_eq!(extract_access_token(&body).as_deref(), Some("top"));

    // data.token wins over data.accessToken
    let body = json!({"data": {"token": "nested", "accessToken": "camel"}});
    assert_eq!(extract_access_token(&body).as_deref(), Some("nested"));
}

#[test]
fn test_extract_token_missing() {
    assert!(extract_access_token(&json!({"success": true})).is_none());
    assert!(extract_access_token(&json!({"data": {}})).is_none());
    assert!(extract_access_token(&json!({"token": 42})).is_none());
}

// ============================================================================
// Refresh call
// ============================================================================

#[tokio::test]
async fn test_refresh_installs_new_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .and(body_string(""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"accessToken": "fresh-token"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = MemorySessionStore::with_token("stale");
    let refresher = TokenRefresher::new(reqwest::Client::new(), &mock_server.uri());

    let token = refresher.refresh(&store, Some("stale")).await.unwrap();
    assert_eq!(token, "fresh-token");
    assert_eq!(store.access_token().as_deref(), Some("fresh-token"));
}

#[tokio::test]
async fn test_refresh_failure_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let store = MemorySessionStore::with_token("stale");
    let refresher = TokenRefresher::new(reqwest::Client::new(), &mock_server.uri());

    let err = refresher.refresh(&store, Some("stale")).await.unwrap_err();
    assert!(err.is_session_expired());
    // The refresher reports failure; the session wipe is the client's job.
    assert_eq!(store.access_token().as_deref(), Some("stale"));
}

#[tokio::test]
async fn test_refresh_success_false_is_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "token": "ignored"})),
        )
        .mount(&mock_server)
        .await;

    let store = MemorySessionStore::new();
    let refresher = TokenRefresher::new(reqwest::Client::new(), &mock_server.uri());

    assert!(refresher.refresh(&store, None).await.is_err());
    assert!(store.access_token().is_none());
}

#[tokio::test]
async fn test_refresh_no_usable_token_is_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&mock_server)
        .await;

    let store = MemorySessionStore::new();
    let refresher = TokenRefresher::new(reqwest::Client::new(), &mock_server.uri());

    assert!(refresher.refresh(&store, None).await.is_err());
}

#[tokio::test]
async fn test_concurrent_refreshes_coalesce() {
    let mock_server = MockServer::start().await;

    // The mock asserts the endpoint is hit exactly once even though four
    // tasks all try to refresh the same stale token.
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "token": "shared"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemorySessionStore::with_token("stale"));
    let refresher = Arc::new(TokenRefresher::new(
        reqwest::Client::new(),
        &mock_server.uri(),
    ));

    let mut handles = Vec::new();
    for _ in 0..4 {
        let store = Arc::clone(&store);
        let refresher = Arc::clone(&refresher);
        handles.push(tokio::spawn(async move {
            refresher.refresh(store.as_ref(), Some("stale")).await
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), "shared");
    }
    assert_eq!(store.access_token().as_deref(), Some("shared"));
}
