//! Key-value persistence boundary.
//!
//! The engine never touches storage itself; callers hand it a store that
//! can `get` and `put` opaque blobs.

use crate::{DeserializationError, Persistable};
use derive_more::{Display, Error, From};
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// Storage failure.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Failure while saving or loading a game.
#[derive(Debug, Display, Error, From)]
pub enum PersistError {
    /// The store failed.
    #[display("{}", _0)]
    Store(StoreError),
    /// A stored blob is not a valid game.
    #[display("{}", _0)]
    Deserialization(DeserializationError),
    /// The game could not be encoded.
    #[display("Encoding failed: {}", _0)]
    Encode(serde_json::Error),
}

/// A key-value store of opaque blobs.
pub trait KeyValueStore {
    /// Returns the blob stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `blob` under `key`, replacing any previous value.
    fn put(&mut self, key: &str, blob: String) -> Result<(), StoreError>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, blob: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), blob);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Saves `value` under its store key, replacing any previous save.
#[instrument(skip(store, value), fields(key = P::STORE_KEY))]
pub fn save<P, S>(store: &mut S, value: &P) -> Result<(), PersistError>
where
    P: Persistable,
    S: KeyValueStore + ?Sized,
{
    let blob = value.encode()?;
    store.put(P::STORE_KEY, blob)?;
    info!("Game saved");
    Ok(())
}

/// Loads the saved value, `Ok(None)` when nothing is stored.
///
/// # Errors
///
/// `PersistError::Deserialization` when a blob exists but is not a valid game.
#[instrument(skip(store), fields(key = P::STORE_KEY))]
pub fn load<P, S>(store: &S) -> Result<Option<P>, PersistError>
where
    P: Persistable,
    S: KeyValueStore + ?Sized,
{
    let Some(blob) = store.get(P::STORE_KEY)? else {
        debug!("No saved game");
        return Ok(None);
    };
    let value = P::decode(&blob)?;
    info!("Game loaded");
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MetaMatch, Player, UltimateGame};

    #[test]
    fn test_load_missing_is_none() {
        let store = MemoryStore::new();
        assert!(load::<MetaMatch, _>(&store).unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let mut duel = MetaMatch::new();
        duel.apply_move(4, 4, 4, Player::X).unwrap();
        save(&mut store, &duel).unwrap();
        assert_eq!(load::<MetaMatch, _>(&store).unwrap(), Some(duel));
        // Separate keys per variant.
        assert!(load::<UltimateGame, _>(&store).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_blob_is_deserialization_error() {
        let mut store = MemoryStore::new();
        store.put(MetaMatch::STORE_KEY, "{\"games\": []}".to_string()).unwrap();
        assert!(matches!(
            load::<MetaMatch, _>(&store),
            Err(PersistError::Deserialization(_))
        ));
    }

    #[test]
    fn test_remove() {
        let mut store = MemoryStore::new();
        save(&mut store, &UltimateGame::new()).unwrap();
        store.remove(UltimateGame::STORE_KEY).unwrap();
        store.remove(UltimateGame::STORE_KEY).unwrap();
        assert!(load::<UltimateGame, _>(&store).unwrap().is_none());
    }
}
