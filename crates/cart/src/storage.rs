//! Cart snapshot persistence.
//!
//! Persistence is a single string-keyed slot under a fixed namespace key, in
//! the shape of web local storage: read the whole snapshot, overwrite the
//! whole snapshot. The store offers no transactional guarantee beyond last
//! writer wins.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

/// Storage keys for persisted client state.
pub mod storage_keys {
    /// Slot holding the serialized cart snapshot.
    pub const CART: &str = "treadly.cart";
}

/// Errors that can occur reading or writing a snapshot slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem access failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The slot file or a snapshot could not be encoded or decoded.
    #[error("storage encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// A string-keyed slot store for serialized snapshots.
///
/// Implementations are synchronous; cart mutations only suspend at
/// network-fetch points.
pub trait SnapshotStore {
    /// Read the slot. `None` when it has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read or decoded.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the slot with a new snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn write(&self, key: &str, snapshot: &str) -> Result<(), StorageError>;
}

/// File-backed slot store.
///
/// All slots live in one JSON object (`{"<key>": "<snapshot>"}`) at a fixed
/// path. A missing file reads as empty; every write rewrites the whole file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by the file at `path`.
    ///
    /// The file is created on first write; the parent directory must exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load_slots(&self) -> Result<HashMap<String, String>, StorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&raw)?)
    }
}

impl SnapshotStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load_slots()?.get(key).cloned())
    }

    fn write(&self, key: &str, snapshot: &str) -> Result<(), StorageError> {
        // A corrupt slot file is abandoned rather than propagated; the write
        // replaces it. Last writer wins.
        let mut slots = self.load_slots().unwrap_or_default();
        slots.insert(key.to_string(), snapshot.to_string());
        std::fs::write(&self.path, serde_json::to_string(&slots)?)?;
        Ok(())
    }
}

/// In-memory slot store for tests and embedding.
///
/// Cheaply cloneable; clones share the same slots.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(slots.get(key).cloned())
    }

    fn write(&self, key: &str, snapshot: &str) -> Result<(), StorageError> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.insert(key.to_string(), snapshot.to_string());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("slots.json"));

        assert!(store.read(storage_keys::CART).unwrap().is_none());

        store.write(storage_keys::CART, "[]").unwrap();
        assert_eq!(store.read(storage_keys::CART).unwrap().as_deref(), Some("[]"));

        store.write(storage_keys::CART, r#"[{"amount":1}]"#).unwrap();
        assert_eq!(
            store.read(storage_keys::CART).unwrap().as_deref(),
            Some(r#"[{"amount":1}]"#)
        );
    }

    #[test]
    fn test_file_store_keeps_other_slots() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("slots.json"));

        store.write("treadly.cart", "[]").unwrap();
        store.write("treadly.theme", "dark").unwrap();

        assert_eq!(store.read("treadly.cart").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.read("treadly.theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_file_store_corrupt_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slots.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(
            store.read(storage_keys::CART),
            Err(StorageError::Encoding(_))
        ));

        // A write replaces the corrupt file.
        store.write(storage_keys::CART, "[]").unwrap();
        assert_eq!(store.read(storage_keys::CART).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_memory_store_clones_share_slots() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.write(storage_keys::CART, "[]").unwrap();
        assert_eq!(other.read(storage_keys::CART).unwrap().as_deref(), Some("[]"));
    }
}
