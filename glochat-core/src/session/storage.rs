//! Persistence backends for session state
//!
//! The backend is an injectable key-value trait so the store can be
//! tested without touching the filesystem.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Key-value backend for persisted client state
///
/// Values are whole serialized documents; every write replaces the
/// previous value. Single reader/writer is assumed.
pub trait StateStorage: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> crate::Result<Option<String>>;

    /// Replace the value stored under `key`
    fn put(&self, key: &str, value: &str) -> crate::Result<()>;
}

/// File-backed storage, one file per key under a state directory
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        // Keys are fixed names ("chats", "theme"), but sanitize anyway.
        // No extension: values are opaque strings, not always JSON.
        let safe_key = key.replace([':', '/', '\\'], "_");
        self.dir.join(safe_key)
    }
}

impl StateStorage for FileStorage {
    fn get(&self, key: &str) -> crate::Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&path)?))
    }

    fn put(&self, key: &str, value: &str) -> crate::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.key_path(key), value)?;
        Ok(())
    }
}

/// In-memory storage for tests
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStorage for MemoryStorage {
    fn get(&self, key: &str) -> crate::Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| crate::Error::Storage("storage mutex poisoned".to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> crate::Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| crate::Error::Storage("storage mutex poisoned".to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_storage_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        assert!(storage.get("chats").unwrap().is_none());
        storage.put("chats", "[]").unwrap();
        assert_eq!(storage.get("chats").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_storage_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        storage.put("theme", "light").unwrap();
        storage.put("theme", "dark").unwrap();
        assert_eq!(storage.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_file_storage_uses_bare_key_as_filename() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        storage.put("theme", "dark").unwrap();
        assert!(temp_dir.path().join("theme").is_file());
    }

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert!(storage.get("chats").unwrap().is_none());
        storage.put("chats", "{}").unwrap();
        assert_eq!(storage.get("chats").unwrap().as_deref(), Some("{}"));
    }
}
