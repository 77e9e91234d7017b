mod sqlite;

#[cfg(test)]
mod memory;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub(crate) use sqlite::SqliteStore;

#[cfg(test)]
pub(crate) use memory::MemoryStore;

pub(crate) const AVAILABLE_MONTHS_KEY: &str = "availableMonths";
pub(crate) const CURRENCY_KEY: &str = "currencySymbol";
pub(crate) const DARK_MODE_KEY: &str = "darkMode";
pub(crate) const LANGUAGE_KEY: &str = "language";

#[derive(Debug, Error)]
pub(crate) enum StorageError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("malformed value: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// String-keyed persistent storage. Every call can fail; callers decide
/// whether a failure matters.
pub(crate) trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Read and decode a JSON value. `Ok(None)` when the key is absent.
pub(crate) fn get_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub(crate) fn set_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

#[cfg(test)]
mod tests;
