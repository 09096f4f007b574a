//! Reading List Catalog Library
//!
//! Catalog filtering plus a persisted reading list kept in sync across every
//! open instance of the application.

pub mod catalog;
pub mod config;
pub mod filter;
pub mod local_storage;
pub mod reading_list;
pub mod session;
pub mod sqlite_persistence;
pub mod sync;

// Re-export commonly used types for convenience
pub use catalog::{load_catalog, Book, Catalog};
pub use local_storage::{InMemoryLocalStorage, LocalStorage, SqliteLocalStorage};
pub use session::{AppSession, SessionSettings};
pub use sync::BroadcastHub;
