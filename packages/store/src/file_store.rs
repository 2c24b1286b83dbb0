//! # Filesystem-backed session store
//!
//! [`FileStore`] keeps one file per key under a base directory. It backs
//! native builds and the test suite; browsers use `IdbStore` instead.
//!
//! ```text
//! <base_dir>/
//! └── <key>.json
//! ```
//!
//! Pass a platform data directory (e.g. from `dirs::data_dir()`) joined with
//! the application name.

use std::path::PathBuf;

use crate::repo::SessionStore;

#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
            .collect();
        self.base.join(format!("{}.json", name))
    }
}

impl SessionStore for FileStore {
    async fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path(key)).ok()
    }

    async fn put(&self, key: &str, value: String) {
        let path = self.path(key);
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = std::fs::write(&path, value) {
            tracing::warn!("Failed to write {}: {}", path.display(), e);
        }
    }

    async fn remove(&self, key: &str) {
        let _ = std::fs::remove_file(self.path(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::{SessionRepository, StoredSession};
    use api::{Role, User};

    #[tokio::test]
    async fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!("lms_store_test_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let session = StoredSession {
            token: "abc".into(),
            user: User {
                id: 1,
                email: "t@school.edu".into(),
                full_name: "Tess".into(),
                role: Role::Teacher,
                is_active: true,
                program_id: None,
            },
        };

        SessionRepository::new(FileStore::new(dir.clone()))
            .save(&session)
            .await;

        // Re-open from same directory
        let reopened = SessionRepository::new(FileStore::new(dir.clone()));
        assert_eq!(reopened.load().await, Some(session));
        assert!(dir.join("lms.session.json").exists());

        reopened.clear().await;
        assert!(reopened.load().await.is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_key_sanitised() {
        let store = FileStore::new(PathBuf::from("/tmp/x"));
        assert_eq!(store.path("../etc/passwd"), PathBuf::from("/tmp/x/.._etc_passwd.json"));
    }
}
