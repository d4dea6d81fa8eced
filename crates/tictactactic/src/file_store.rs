//! Key-value store backed by one file per key.

use std::path::{Path, PathBuf};
use tictactactic_core::{KeyValueStore, StoreError};
use tracing::{debug, instrument};

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            debug!("No file for key");
            return Ok(None);
        }
        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| StoreError::new(format!("Failed to read {}: {}", path.display(), e)))
    }

    #[instrument(skip(self, blob), fields(dir = %self.dir.display(), bytes = blob.len()))]
    fn put(&mut self, key: &str, blob: String) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            StoreError::new(format!("Failed to create {}: {}", self.dir.display(), e))
        })?;
        let path = self.path_for(key);
        std::fs::write(&path, blob)
            .map_err(|e| StoreError::new(format!("Failed to write {}: {}", path.display(), e)))?;
        debug!("Blob written");
        Ok(())
    }

    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        if path.exists() {
            std::fs::remove_file(&path).map_err(|e| {
                StoreError::new(format!("Failed to remove {}: {}", path.display(), e))
            })?;
            debug!("Blob removed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactactic_core::{MetaMatch, Player, load, save};

    #[test]
    fn test_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get("nothing").unwrap(), None);
    }

    #[test]
    fn test_put_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested").join("saves"));
        store.put("key", "blob".to_string()).unwrap();
        assert_eq!(store.get("key").unwrap().as_deref(), Some("blob"));
        assert!(store.dir().join("key.json").exists());
    }

    #[test]
    fn test_match_survives_a_new_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut duel = MetaMatch::new();
        duel.apply_move(1, 2, 3, Player::X).unwrap();

        let mut store = FileStore::new(dir.path());
        save(&mut store, &duel).unwrap();

        let reopened = FileStore::new(dir.path());
        assert_eq!(load::<MetaMatch, _>(&reopened).unwrap(), Some(duel));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        store.put("key", "blob".to_string()).unwrap();
        store.remove("key").unwrap();
        store.remove("key").unwrap();
        assert_eq!(store.get("key").unwrap(), None);
    }
}
