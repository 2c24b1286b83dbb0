//! # Session repository over an abstract key/value store
//!
//! [`SessionStore`] is the async string key/value interface each platform
//! implements ([`crate::MemoryStore`], [`crate::FileStore`], and on the web
//! `IdbStore`). [`SessionRepository`] layers the one record we keep on top of
//! it: a [`StoredSession`] serialised as JSON under [`SESSION_KEY`].
//!
//! Stores never fail loudly. A missing or unreadable value is reported as
//! `None`, and a value that no longer parses is treated as signed out and
//! removed, so a stale schema cannot wedge the login screen.

use api::User;
use serde::{Deserialize, Serialize};

pub const SESSION_KEY: &str = "lms.session";

/// Async trait for string values keyed by name.
pub trait SessionStore {
    fn get(&self, key: &str) -> impl std::future::Future<Output = Option<String>>;
    fn put(&self, key: &str, value: String) -> impl std::future::Future<Output = ()>;
    fn remove(&self, key: &str) -> impl std::future::Future<Output = ()>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub user: User,
}

pub struct SessionRepository<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> SessionRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn load(&self) -> Option<StoredSession> {
        let raw = self.store.get(SESSION_KEY).await?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!("Discarding unreadable stored session: {}", e);
                self.store.remove(SESSION_KEY).await;
                None
            }
        }
    }

    pub async fn save(&self, session: &StoredSession) {
        match serde_json::to_string(session) {
            Ok(json) => self.store.put(SESSION_KEY, json).await,
            Err(e) => tracing::error!("Failed to serialise session: {}", e),
        }
    }

    pub async fn clear(&self) {
        self.store.remove(SESSION_KEY).await;
    }
}
