//! Platform session repository.
//!
//! Returns a [`store::SessionRepository`] backed by the appropriate [`store::SessionStore`]:
//! - **Web** (WASM + `web` feature): IndexedDB via `store::IdbStore`
//! - **Native**: one file per key under `<data_dir>/lms/`

pub fn make_session_repo() -> store::SessionRepository<impl store::SessionStore> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::SessionRepository::new(store::IdbStore::new())
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        store::SessionRepository::new(store::MemoryStore::new())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("lms");
        store::SessionRepository::new(store::FileStore::new(base))
    }
}
