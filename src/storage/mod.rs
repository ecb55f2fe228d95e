//! Persistence of the document under a single storage key

mod autosave;
#[cfg(not(target_arch = "wasm32"))]
mod file;
mod local;

pub use autosave::{current_timestamp, Autosave, DEFAULT_AUTOSAVE_INTERVAL_MS};
#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
pub use local::LocalStore;

use crate::document::{ContentState, RawContent};
use crate::error::{Result, StorageError};
use rustc_hash::FxHashMap;

/// Key the document is stored under
pub const DEFAULT_STORAGE_KEY: &str = "content";

/// A string-to-string store, synchronous like browser local storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> std::result::Result<(), StorageError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> std::result::Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Serialize content to its raw JSON form
pub fn serialize(content: &ContentState) -> Result<String> {
    Ok(serde_json::to_string(&content.to_raw())?)
}

/// Parse raw JSON back into content
pub fn deserialize(json: &str) -> Result<ContentState> {
    let raw: RawContent = serde_json::from_str(json)?;
    Ok(ContentState::from_raw(raw)?)
}

/// Write the document under `key`
pub fn save<S: KeyValueStore + ?Sized>(store: &mut S, key: &str, content: &ContentState) -> Result<()> {
    let json = serialize(content)?;
    store.set(key, &json)?;
    log::info!("saved {} blocks under {:?}", content.block_count(), key);
    Ok(())
}

/// Read the document under `key`; `None` when nothing is stored
pub fn try_load<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Result<Option<ContentState>> {
    match store.get(key)? {
        Some(json) => deserialize(&json).map(Some),
        None => Ok(None),
    }
}

/// Read the document under `key`, falling back to an empty document
pub fn load<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> ContentState {
    match try_load(store, key) {
        Ok(Some(content)) => {
            log::info!("loaded {} blocks from {:?}", content.block_count(), key);
            content
        }
        Ok(None) => {
            log::debug!("nothing stored under {:?}, starting empty", key);
            ContentState::new()
        }
        Err(e) => {
            log::warn!("discarding stored content under {:?}: {}", key, e);
            ContentState::new()
        }
    }
}
