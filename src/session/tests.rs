//! Tests for the session store

use super::*;
use crate::types::UserProfile;
use std::sync::Arc;

fn sample_user() -> UserProfile {
    UserProfile {
        id: "u-1".to_string(),
        name: Some("Ada".to_string()),
        email: "ada@example.com".to_string(),
        role: Some("client".to_string()),
    }
}

#[test]
fn test_empty_store() {
    let store = MemorySessionStore::new();
    assert!(store.access_token().is_none());
    assert!(store.user().is_none());
    assert!(!store.is_authenticated());
}

#[test]
fn test_token_replacement() {
    let store = MemorySessionStore::with_token("first");
    assert_eq!(store.access_token().as_deref(), Some("first"));
    assert!(store.is_authenticated());

    store.set_access_token("second".to_string());
    assert_eq!(store.access_token().as_deref(), Some("second"));
}

#[test]
fn test_clear_wipes_everything() {
    let store = MemorySessionStore::with_token("tok");
    store.set_user(sample_user());

    store.clear();

    assert!(store.access_token().is_none());
    assert!(store.user().is_none());
    assert!(!store.is_authenticated());
}

#[test]
fn test_last_write_wins_across_threads() {
    let store = Arc::new(MemorySessionStore::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || store.set_access_token(format!("tok-{i}")))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // Some write won; the slot is never partially updated.
    let token = store.access_token().unwrap();
    assert!(token.starts_with("tok-"));
}

#[test]
fn test_store_as_trait_object() {
    let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
    store.set_access_token("via-dyn".to_string());
    assert_eq!(store.access_token().as_deref(), Some("via-dyn"));
}
