use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::repo::SessionStore;

/// In-memory SessionStore for tests and as a fallback when no platform store
/// is available.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    async fn put(&self, key: &str, value: String) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value);
        }
    }

    async fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::{SessionRepository, StoredSession, SESSION_KEY};
    use api::{Role, User};

    fn session() -> StoredSession {
        StoredSession {
            token: "tok-1".into(),
            user: User {
                id: 4,
                email: "sam@school.edu".into(),
                full_name: "Sam Reyes".into(),
                role: Role::Student,
                is_active: true,
                program_id: Some(2),
            },
        }
    }

    #[tokio::test]
    async fn test_empty_store_loads_none() {
        let repo = SessionRepository::new(MemoryStore::new());
        assert!(repo.load().await.is_none());
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let store = MemoryStore::new();
        let repo = SessionRepository::new(store.clone());

        repo.save(&session()).await;
        assert_eq!(repo.load().await, Some(session()));
        assert!(store.get(SESSION_KEY).await.unwrap().contains("tok-1"));

        repo.clear().await;
        assert!(repo.load().await.is_none());
        assert!(store.get(SESSION_KEY).await.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_session_is_discarded() {
        let store = MemoryStore::new();
        store.put(SESSION_KEY, "{not json".into()).await;

        let repo = SessionRepository::new(store.clone());
        assert!(repo.load().await.is_none());
        assert!(store.get(SESSION_KEY).await.is_none());
    }

    #[tokio::test]
    async fn test_other_keys_untouched() {
        let store = MemoryStore::new();
        store.put("theme", "dark".into()).await;
        let repo = SessionRepository::new(store.clone());
        repo.save(&session()).await;
        repo.clear().await;
        assert_eq!(store.get("theme").await.as_deref(), Some("dark"));
    }
}
