use std::{
    collections::{BTreeMap, HashMap},
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage quota exceeded: {needed} bytes needed, {quota} available")]
    QuotaExceeded { needed: usize, quota: usize },
}

pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects writes once the total size of keys and values would exceed
    /// `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota: Some(quota),
        }
    }

    fn used_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            let needed = self.used_without(key) + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded { needed, quota });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Key-value map kept as one JSON object on disk, written via temp file and rename.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "storage_file_unreadable");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "storage_file_open_failed");
                BTreeMap::new()
            }
        };

        debug!(path = %path.display(), keys = entries.len(), "storage_opened");
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut next = self.entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.flush(&next)?;
        self.entries = next;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        let mut next = self.entries.clone();
        next.remove(key);
        self.flush(&next)?;
        self.entries = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_enforces_quota() {
        let mut storage = MemoryStorage::with_quota(16);
        storage.set("k", "small").unwrap();

        let err = storage.set("k", "this value is far too long").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { .. }));
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("small"));
    }

    #[test]
    fn file_storage_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let mut storage = FileStorage::open(&path);
        storage.set("lessons", "[]").unwrap();
        storage.set("isAdmin", "true").unwrap();
        storage.remove("isAdmin").unwrap();

        let reopened = FileStorage::open(&path);
        assert_eq!(reopened.get("lessons").unwrap().as_deref(), Some("[]"));
        assert_eq!(reopened.get("isAdmin").unwrap(), None);
    }

    #[test]
    fn file_storage_ignores_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{not json").unwrap();

        let storage = FileStorage::open(&path);
        assert_eq!(storage.get("lessons").unwrap(), None);
    }

    #[test]
    fn file_storage_keeps_state_when_write_fails() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in place of the file makes the rename fail.
        let path = dir.path().join("blocked");
        fs::create_dir_all(path.join("inner")).unwrap();

        let mut storage = FileStorage::open(&path);
        assert!(storage.set("lessons", "[]").is_err());
        assert_eq!(storage.get("lessons").unwrap(), None);
    }
}
