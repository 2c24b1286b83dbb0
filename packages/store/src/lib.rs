//! Client-side persistence of the signed-in session.
//!
//! The backend owns every LMS record; the only thing kept on the device is
//! the bearer token and the user it belongs to, so a reload does not sign
//! the user out.

pub mod repo;

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod idb;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use idb::IdbStore;

pub use repo::{SessionRepository, SessionStore, StoredSession, SESSION_KEY};
