//! Local key-value persistence
//!
//! The browser-local store the front-end kept its session and view
//! preferences in, as a small trait with two implementations: a
//! file-backed store for real use and an in-memory store for tests.
//! Corrupt or unreadable state degrades to "nothing stored" rather than
//! failing the caller.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};
use thiserror::Error;

/// Serialized session user object
pub const KEY_USER: &str = "user";
/// Bearer token from the last login
pub const KEY_TOKEN: &str = "token";
/// Logged-in marker flag
pub const KEY_IS_LOGGED_IN: &str = "isLoggedIn";
/// Persisted library view mode (grid/list)
pub const KEY_VIEW_MODE: &str = "libraryViewMode";
/// Persisted library sort key
pub const KEY_SORT_BY: &str = "librarySortBy";

/// Storage-specific errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A string key-value store with durable semantics left to the
/// implementation
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.write().remove(key);
        Ok(())
    }
}

/// File-backed store: one JSON map under the state directory, replaced
/// atomically on every write
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStorage {
    /// Open (or create) the store under `dir`.
    ///
    /// A corrupt state file is discarded with a warning; it is treated
    /// the same as an absent one.
    pub fn open(dir: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(dir)?;
        let path = dir.join("state.json");
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                tracing::warn!("Discarding corrupt state file {}: {}", path.display(), err);
                HashMap::new()
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(entries)?;
        // Write-then-rename so a crash mid-write never leaves a torn file
        let tmp = self
            .path
            .with_file_name(format!("state.{}.tmp", uuid::Uuid::new_v4()));
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock();
        entries.remove(key);
        self.persist(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("token").unwrap(), None);
        storage.set("token", "jwt").unwrap();
        assert_eq!(storage.get("token").unwrap(), Some("jwt".to_string()));
        storage.remove("token").unwrap();
        assert_eq!(storage.get("token").unwrap(), None);
    }

    #[test]
    fn file_storage_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let storage = FileStorage::open(dir.path()).unwrap();
            storage.set("libraryViewMode", "list").unwrap();
        }
        let storage = FileStorage::open(dir.path()).unwrap();
        assert_eq!(
            storage.get("libraryViewMode").unwrap(),
            Some("list".to_string())
        );
    }

    #[test]
    fn corrupt_state_file_is_treated_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("state.json"), "{not json").unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        assert_eq!(storage.get("user").unwrap(), None);
        // And the store is writable again afterwards
        storage.set("user", "{}").unwrap();
        assert_eq!(storage.get("user").unwrap(), Some("{}".to_string()));
    }
}
