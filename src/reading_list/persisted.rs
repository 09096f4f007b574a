//! Reading and writing the two local storage entries that hold the reading
//! list and its available count.

use crate::catalog::Book;
use crate::local_storage::LocalStorage;
use anyhow::{Context, Result};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageKeys {
    pub reading_list: String,
    pub available: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            reading_list: "readlist".to_string(),
            available: "available".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum PersistedStateError {
    #[error("No value stored under {0}")]
    Missing(String),

    #[error("Value stored under {key} is malformed: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage read failed: {0}")]
    Storage(anyhow::Error),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersistedState {
    pub books: Vec<Book>,
    pub available: usize,
}

/// Both entries must be present and well formed for either to be trusted.
pub fn read_persisted_state(
    storage: &dyn LocalStorage,
    keys: &StorageKeys,
) -> Result<PersistedState, PersistedStateError> {
    let raw_books = storage
        .get_item(&keys.reading_list)
        .map_err(PersistedStateError::Storage)?;
    let raw_available = storage
        .get_item(&keys.available)
        .map_err(PersistedStateError::Storage)?;

    let (raw_books, raw_available) = match (raw_books, raw_available) {
        (Some(b), Some(a)) => (b, a),
        (None, _) => return Err(PersistedStateError::Missing(keys.reading_list.clone())),
        (_, None) => return Err(PersistedStateError::Missing(keys.available.clone())),
    };

    let books = serde_json::from_str(&raw_books).map_err(|source| {
        PersistedStateError::Malformed {
            key: keys.reading_list.clone(),
            source,
        }
    })?;
    let available = serde_json::from_str(&raw_available).map_err(|source| {
        PersistedStateError::Malformed {
            key: keys.available.clone(),
            source,
        }
    })?;

    Ok(PersistedState { books, available })
}

pub fn write_persisted_state(
    storage: &dyn LocalStorage,
    keys: &StorageKeys,
    books: &[Book],
    available: usize,
) -> Result<()> {
    let books_json = serde_json::to_string(books).context("Failed to serialize reading list")?;
    storage
        .set_item(&keys.reading_list, &books_json)
        .with_context(|| format!("Failed to write {}", keys.reading_list))?;
    storage
        .set_item(&keys.available, &available.to_string())
        .with_context(|| format!("Failed to write {}", keys.available))?;
    Ok(())
}
