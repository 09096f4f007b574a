//! Durable key-value storage shared by every instance of the application.

mod in_memory;
mod schema;
mod sqlite_local_storage;

pub use in_memory::InMemoryLocalStorage;
pub use schema::LOCAL_STORAGE_VERSIONED_SCHEMAS;
pub use sqlite_local_storage::SqliteLocalStorage;

use anyhow::Result;

/// String keys to string values, last writer wins.
pub trait LocalStorage: Send + Sync {
    /// Returns Ok(None) if the key was never written or was removed.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Inserts or overwrites the value of a key.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&self, key: &str) -> Result<()>;
}
