//! # IndexedDB session store
//!
//! [`IdbStore`] is the [`SessionStore`] used in the browser. Values live in a
//! single IndexedDB object store, `"session"`, inside the `"lms"` database,
//! accessed through [`rexie`].
//!
//! A fresh [`Rexie`] connection is opened per operation; `Rexie` is not
//! `Clone` and the browser caches the underlying connection.
//!
//! Errors are swallowed: an unavailable IndexedDB reads as "signed out".

use crate::repo::SessionStore;
use rexie::{ObjectStore as RexieObjectStore, Rexie, TransactionMode};
use wasm_bindgen::JsValue;

const DB_NAME: &str = "lms";
const DB_VERSION: u32 = 1;
const SESSION_STORE: &str = "session";

#[derive(Clone, Default)]
pub struct IdbStore;

impl IdbStore {
    pub fn new() -> Self {
        Self
    }

    async fn open_db(&self) -> Result<Rexie, rexie::Error> {
        Rexie::builder(DB_NAME)
            .version(DB_VERSION)
            .add_object_store(RexieObjectStore::new(SESSION_STORE))
            .build()
            .await
    }
}

impl SessionStore for IdbStore {
    async fn get(&self, key: &str) -> Option<String> {
        let db = self.open_db().await.ok()?;
        let tx = db
            .transaction(&[SESSION_STORE], TransactionMode::ReadOnly)
            .ok()?;
        let store = tx.store(SESSION_STORE).ok()?;

        let value = store.get(JsValue::from_str(key)).await.ok()??;
        serde_wasm_bindgen::from_value(value).ok()
    }

    async fn put(&self, key: &str, value: String) {
        let Ok(db) = self.open_db().await else {
            tracing::warn!("IndexedDB unavailable; session not saved");
            return;
        };
        let Ok(tx) = db.transaction(&[SESSION_STORE], TransactionMode::ReadWrite) else {
            return;
        };
        let Ok(store) = tx.store(SESSION_STORE) else {
            return;
        };

        let js_key = JsValue::from_str(key);
        let js_value = JsValue::from_str(&value);
        let _ = store.put(&js_value, Some(&js_key)).await;
        let _ = tx.done().await;
    }

    async fn remove(&self, key: &str) {
        let Ok(db) = self.open_db().await else {
            return;
        };
        let Ok(tx) = db.transaction(&[SESSION_STORE], TransactionMode::ReadWrite) else {
            return;
        };
        let Ok(store) = tx.store(SESSION_STORE) else {
            return;
        };

        let _ = store.delete(JsValue::from_str(key)).await;
        let _ = tx.done().await;
    }
}
