//! Fixture creation for catalog and local storage

use super::constants::*;
use readlist::catalog::{load_catalog, Catalog};
use readlist::local_storage::{InMemoryLocalStorage, LocalStorage, SqliteLocalStorage};
use readlist::session::{AppSession, SessionSettings};
use readlist::sync::BroadcastHub;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// One "browser profile": a catalog, the local storage every tab shares and
/// the hub their channels live on.
pub struct TestShelf {
    // Kept alive for the lifetime of the shelf
    _dir: TempDir,
    pub catalog: Arc<Catalog>,
    pub storage: Arc<dyn LocalStorage>,
    pub hub: Arc<BroadcastHub>,
    pub settings: SessionSettings,
    pub db_path: Option<PathBuf>,
}

impl TestShelf {
    fn create(sqlite: bool) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let catalog_path = dir.path().join("books.json");
        fs::write(&catalog_path, CATALOG_JSON).expect("Failed to write catalog");
        let catalog = Arc::new(load_catalog(&catalog_path).expect("Failed to load catalog"));

        let (storage, db_path): (Arc<dyn LocalStorage>, Option<PathBuf>) = if sqlite {
            let db_path = dir.path().join("local_storage.db");
            let storage =
                SqliteLocalStorage::new(&db_path).expect("Failed to open local storage");
            (Arc::new(storage), Some(db_path))
        } else {
            (Arc::new(InMemoryLocalStorage::new()), None)
        };

        TestShelf {
            _dir: dir,
            catalog,
            storage,
            hub: Arc::new(BroadcastHub::new()),
            settings: SessionSettings::default(),
            db_path,
        }
    }

    pub fn in_memory() -> Self {
        Self::create(false)
    }

    pub fn with_sqlite() -> Self {
        Self::create(true)
    }

    pub fn open_tab(&self) -> AppSession {
        AppSession::open(
            self.catalog.clone(),
            self.storage.clone(),
            &self.hub,
            &self.settings,
        )
    }

    /// Simulates a restart: a new process with a fresh hub and a new handle
    /// on the same SQLite file.
    pub fn restart(&self) -> AppSession {
        let db_path = self
            .db_path
            .as_ref()
            .expect("restart needs a SQLite backed shelf");
        let storage = SqliteLocalStorage::new(db_path).expect("Failed to reopen local storage");
        AppSession::open(
            self.catalog.clone(),
            Arc::new(storage),
            &Arc::new(BroadcastHub::new()),
            &self.settings,
        )
    }
}
