//! Session state
//!
//! The access token and cached user identity live behind the
//! `SessionStore` trait, injected into the client at construction.
//! The refresh token is never held here: it travels only in the
//! http-only cookie managed by the HTTP transport.

mod store;

pub use store::{MemorySessionStore, SessionStore};

#[cfg(test)]
mod tests;
