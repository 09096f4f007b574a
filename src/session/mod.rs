//! Application state of one open instance ("tab").
//!
//! An `AppSession` is built once at startup from the shared catalog, durable
//! storage and broadcast hub. It owns the filter state and the reading list
//! and is the only thing that mutates them.

use crate::catalog::{Book, Catalog, CatalogIndex};
use crate::filter::{FilterSelection, FilterState};
use crate::local_storage::LocalStorage;
use crate::reading_list::{ReadingListStore, StorageKeys};
use crate::sync::BroadcastHub;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSettings {
    pub channel_name: String,
    pub storage_keys: StorageKeys,
    /// When set, filter changes also recompute the available count (in memory
    /// only). Off by default: the count follows reading list mutations alone.
    pub refresh_available_on_filter_change: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            channel_name: "readlist".to_string(),
            storage_keys: StorageKeys::default(),
            refresh_available_on_filter_change: false,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("No book with ISBN {0} in the catalog")]
    UnknownIsbn(String),
}

pub struct AppSession {
    catalog: Arc<Catalog>,
    filter: FilterState,
    reading_list: ReadingListStore,
    refresh_available_on_filter_change: bool,
}

impl AppSession {
    /// Opens the broadcast channel and restores the persisted reading list.
    pub fn open(
        catalog: Arc<Catalog>,
        storage: Arc<dyn LocalStorage>,
        hub: &Arc<BroadcastHub>,
        settings: &SessionSettings,
    ) -> Self {
        let channel = hub.open(&settings.channel_name);
        let mut reading_list =
            ReadingListStore::new(storage, channel, settings.storage_keys.clone());
        reading_list.load_from_storage();

        let session = Self {
            filter: FilterState::new(catalog.clone()),
            catalog,
            reading_list,
            refresh_available_on_filter_change: settings.refresh_available_on_filter_change,
        };
        info!(
            "Session {} opened with {} books in the reading list",
            session.instance_id(),
            session.reading_list.len()
        );
        session
    }

    pub fn instance_id(&self) -> usize {
        self.reading_list.instance_id()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn index(&self) -> &CatalogIndex {
        self.catalog.index()
    }

    pub fn selection(&self) -> &FilterSelection {
        self.filter.selection()
    }

    pub fn matches(&self) -> &[Book] {
        self.filter.matches()
    }

    pub fn reading_list(&self) -> &[Book] {
        self.reading_list.books()
    }

    pub fn available(&self) -> usize {
        self.reading_list.available()
    }

    pub fn is_in_reading_list(&self, isbn: &str) -> bool {
        self.reading_list.contains(isbn)
    }

    pub fn set_genre(&mut self, genre: Option<String>) {
        self.filter.set_genre(genre);
        self.after_filter_change();
    }

    pub fn set_max_pages(&mut self, max_pages: u32) {
        self.filter.set_max_pages(max_pages);
        self.after_filter_change();
    }

    /// Adds the catalog book with the given ISBN.
    pub fn add(&mut self, isbn: &str) -> Result<(), SessionError> {
        let book = self
            .catalog
            .get_book(isbn)
            .cloned()
            .ok_or_else(|| SessionError::UnknownIsbn(isbn.to_string()))?;
        self.add_book(book);
        Ok(())
    }

    pub fn add_book(&mut self, book: Book) {
        self.reading_list.add(book, self.filter.matches());
    }

    pub fn remove(&mut self, isbn: &str) {
        self.reading_list.remove(isbn, self.filter.matches());
    }

    /// Applies every sibling update already waiting. Returns how many were
    /// applied; unreadable messages are skipped.
    pub fn process_remote_updates(&mut self) -> usize {
        let mut applied = 0;
        while let Some(received) = self.reading_list.try_recv_remote() {
            match received {
                Ok(books) => {
                    self.reading_list
                        .apply_remote_update(books, self.filter.matches());
                    applied += 1;
                }
                Err(err) => warn!(
                    "Session {} skipped a sibling message: {}",
                    self.instance_id(),
                    err
                ),
            }
        }
        applied
    }

    /// Waits for the next readable sibling update and applies it. Returns
    /// false once the channel is closed.
    pub async fn next_remote_update(&mut self) -> bool {
        while let Some(received) = self.reading_list.recv_remote().await {
            match received {
                Ok(books) => {
                    self.reading_list
                        .apply_remote_update(books, self.filter.matches());
                    return true;
                }
                Err(err) => warn!(
                    "Session {} skipped a sibling message: {}",
                    self.instance_id(),
                    err
                ),
            }
        }
        false
    }

    pub fn close(&mut self) {
        info!("Session {} closed", self.instance_id());
        self.reading_list.close();
    }

    fn after_filter_change(&mut self) {
        if self.refresh_available_on_filter_change {
            self.reading_list.refresh_available(self.filter.matches());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Author;
    use crate::local_storage::InMemoryLocalStorage;
    use std::time::Duration;
    use tokio::time::timeout;

    fn book(isbn: &str, genre: &str, pages: u32) -> Book {
        Book {
            title: format!("Book {}", isbn),
            pages,
            genre: genre.to_string(),
            cover: String::new(),
            synopsis: String::new(),
            year: 2020,
            isbn: isbn.to_string(),
            author: Author {
                name: "n".to_string(),
                other_books: vec![],
            },
        }
    }

    struct Env {
        catalog: Arc<Catalog>,
        storage: Arc<dyn LocalStorage>,
        hub: Arc<BroadcastHub>,
    }

    impl Env {
        fn new() -> Self {
            Self {
                catalog: Arc::new(
                    Catalog::new(vec![
                        book("A", "Fiction", 100),
                        book("B", "Fiction", 300),
                        book("C", "Drama", 200),
                    ])
                    .unwrap(),
                ),
                storage: Arc::new(InMemoryLocalStorage::new()),
                hub: Arc::new(BroadcastHub::new()),
            }
        }

        fn open(&self, settings: &SessionSettings) -> AppSession {
            AppSession::open(
                self.catalog.clone(),
                self.storage.clone(),
                &self.hub,
                settings,
            )
        }
    }

    #[test]
    fn add_and_remove_update_available() {
        let env = Env::new();
        let mut session = env.open(&SessionSettings::default());
        session.set_max_pages(200);

        session.add("A").unwrap();
        assert_eq!(session.available(), 1);
        assert!(session.is_in_reading_list("A"));

        session.remove("A");
        assert_eq!(session.available(), 2);
    }

    #[test]
    fn add_unknown_isbn_fails() {
        let env = Env::new();
        let mut session = env.open(&SessionSettings::default());
        assert_eq!(
            session.add("nope"),
            Err(SessionError::UnknownIsbn("nope".to_string()))
        );
        assert!(session.reading_list().is_empty());
    }

    #[test]
    fn filter_change_leaves_available_stale_by_default() {
        let env = Env::new();
        let mut session = env.open(&SessionSettings::default());
        session.add("A").unwrap();
        assert_eq!(session.available(), 2);

        session.set_max_pages(100);
        assert_eq!(session.matches().len(), 1);
        assert_eq!(session.available(), 2);
    }

    #[test]
    fn filter_change_refreshes_available_when_enabled() {
        let env = Env::new();
        let settings = SessionSettings {
            refresh_available_on_filter_change: true,
            ..SessionSettings::default()
        };
        let mut session = env.open(&settings);
        session.add("A").unwrap();

        session.set_genre(Some("Fiction".to_string()));
        assert_eq!(session.available(), 0);

        session.set_genre(None);
        assert_eq!(session.available(), 2);
    }

    #[test]
    fn siblings_converge_without_echo() {
        let env = Env::new();
        let mut first = env.open(&SessionSettings::default());
        let mut second = env.open(&SessionSettings::default());

        first.add("C").unwrap();
        assert_eq!(second.process_remote_updates(), 1);
        assert!(second.is_in_reading_list("C"));

        // The receiver did not echo the update back.
        assert_eq!(first.process_remote_updates(), 0);
    }

    #[test]
    fn session_restores_from_storage() {
        let env = Env::new();
        {
            let mut session = env.open(&SessionSettings::default());
            session.add("B").unwrap();
            session.close();
        }
        let reopened = env.open(&SessionSettings::default());
        assert!(reopened.is_in_reading_list("B"));
        assert_eq!(reopened.available(), 2);
    }

    #[test]
    fn malformed_sibling_message_is_skipped() {
        let env = Env::new();
        let rogue = env.hub.open("readlist");
        let mut session = env.open(&SessionSettings::default());

        rogue
            .post(crate::sync::ChannelMessage::new(
                "readlist",
                serde_json::json!("garbage"),
            ))
            .unwrap();
        assert_eq!(session.process_remote_updates(), 0);
        assert!(session.reading_list().is_empty());
    }

    #[tokio::test]
    async fn next_remote_update_applies_sibling_change() {
        let env = Env::new();
        let mut first = env.open(&SessionSettings::default());
        let mut second = env.open(&SessionSettings::default());

        first.add("A").unwrap();
        let applied = timeout(Duration::from_secs(2), second.next_remote_update())
            .await
            .unwrap();
        assert!(applied);
        assert!(second.is_in_reading_list("A"));
    }

    #[tokio::test]
    async fn next_remote_update_ends_after_close() {
        let env = Env::new();
        let mut session = env.open(&SessionSettings::default());
        session.close();
        assert!(!session.next_remote_update().await);
    }
}
