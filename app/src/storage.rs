use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("key {0:?} not found")]
    KeyNotFound(String),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// String-keyed JSON document store, the durable substrate progress and
/// history live in.
pub trait Storage {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, StorageError>;
    fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StorageError>;
    /// Deleting a missing key is a no-op.
    fn delete(&mut self, key: &str);
}

/// Volatile substrate for tests and hosts without a writable disk.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, StorageError> {
        let raw = self
            .entries
            .get(key)
            .ok_or_else(|| StorageError::KeyNotFound(key.to_string()))?;
        Ok(serde_json::from_str(raw)?)
    }

    fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.entries.insert(key.to_string(), raw);
        Ok(())
    }

    fn delete(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// One JSON document per key under a root directory. The directory is
/// created lazily on first write.
#[derive(Clone, Debug)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Keys may contain `:` namespacing; anything outside `[A-Za-z0-9._-]`
    /// maps to `_` in the file name.
    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| match c {
                'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '_' | '-' => c,
                _ => '_',
            })
            .collect();
        self.root.join(format!("{name}.json"))
    }
}

impl Storage for FileStorage {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, StorageError> {
        let raw = match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(StorageError::KeyNotFound(key.to_string()));
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&raw)?)
    }

    fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)?;
        let raw = serde_json::to_string(value)?;
        fs::write(self.path_for(key), raw)?;
        Ok(())
    }

    fn delete(&mut self, key: &str) {
        if let Err(err) = fs::remove_file(self.path_for(key)) {
            if err.kind() != io::ErrorKind::NotFound {
                log::error!("could not delete {key:?}: {err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_round_trips_documents() {
        let mut storage = MemoryStorage::new();
        storage.set("ruocden:test", &vec![true, false]).unwrap();

        let value: Vec<bool> = storage.get("ruocden:test").unwrap();
        assert_eq!(value, vec![true, false]);

        storage.delete("ruocden:test");
        assert!(matches!(
            storage.get::<Vec<bool>>("ruocden:test"),
            Err(StorageError::KeyNotFound(_))
        ));
    }

    #[test]
    fn file_storage_round_trips_documents() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());

        storage.set("ruocden:progress:default-puzzle-1", &vec![true]).unwrap();
        let value: Vec<bool> = storage.get("ruocden:progress:default-puzzle-1").unwrap();
        assert_eq!(value, vec![true]);

        storage.delete("ruocden:progress:default-puzzle-1");
        assert!(matches!(
            storage.get::<Vec<bool>>("ruocden:progress:default-puzzle-1"),
            Err(StorageError::KeyNotFound(_))
        ));
        // Deleting again stays silent.
        storage.delete("ruocden:progress:default-puzzle-1");
    }

    #[test]
    fn file_storage_missing_key_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        assert!(matches!(
            storage.get::<Vec<bool>>("ruocden:absent"),
            Err(StorageError::KeyNotFound(_))
        ));
    }

    #[test]
    fn file_storage_surfaces_corrupt_documents() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());
        storage.set("ruocden:history", &Vec::<bool>::new()).unwrap();

        fs::write(dir.path().join("ruocden_history.json"), "not json").unwrap();

        assert!(matches!(
            storage.get::<Vec<bool>>("ruocden:history"),
            Err(StorageError::Serde(_))
        ));
    }
}
