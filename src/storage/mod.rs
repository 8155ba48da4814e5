//! Persistence layer - the injected key-value capability collections are saved through.
//!
//! A [`Storage`] maps a collection name to a serialized JSON array. The registry loads
//! each collection once at startup and writes the whole snapshot back after every
//! mutation. Loading is tolerant: a missing key or an unparseable value yields an
//! empty collection, and individual malformed entries are skipped.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

use crate::errors::Result;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

/// Synchronous key-value persistence.
pub trait Storage: Send + Sync {
    /// Returns the raw value stored under `key`, or `None` if it was never saved.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> Result<()>;
}

/// Loads and decodes the collection stored under `key`.
///
/// Never fails: backend errors and malformed data are logged and degrade to an empty
/// (or partial) collection.
pub fn load_collection<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Vec<T> {
    let raw = match storage.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("No stored data for '{}', starting empty", key);
            return Vec::new();
        }
        Err(e) => {
            warn!("Failed to load '{}' from storage, starting empty: {}", key, e);
            return Vec::new();
        }
    };

    let entries: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Stored data for '{}' is not a JSON array, starting empty: {}", key, e);
            return Vec::new();
        }
    };

    let total = entries.len();
    let items: Vec<T> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            serde_json::from_value(entry)
                .inspect_err(|e| warn!("Skipping malformed '{}' entry #{}: {}", key, index, e))
                .ok()
        })
        .collect();

    debug!("Loaded {}/{} '{}' entries", items.len(), total, key);
    items
}

/// Serializes `items` as a JSON array and saves it under `key`.
pub fn save_collection<T: Serialize>(storage: &dyn Storage, key: &str, items: &[T]) -> Result<()> {
    let raw = serde_json::to_string(items)?;
    storage.save(key, &raw)
}
