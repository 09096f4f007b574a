use super::availability::count_available;
use super::persisted::{
    read_persisted_state, write_persisted_state, PersistedStateError, StorageKeys,
};
use crate::catalog::Book;
use crate::local_storage::LocalStorage;
use crate::sync::{ChannelMessage, SyncChannel, SyncError};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// The reading list of one application instance.
///
/// Local mutations are persisted and then broadcast to siblings. Updates
/// received from siblings are persisted but never broadcast again, otherwise
/// every instance would echo every other instance's messages forever.
pub struct ReadingListStore {
    books: Vec<Book>,
    available: usize,
    storage: Arc<dyn LocalStorage>,
    channel: SyncChannel,
    keys: StorageKeys,
}

impl ReadingListStore {
    /// Starts empty with a zero count; call `load_from_storage` to restore.
    pub fn new(storage: Arc<dyn LocalStorage>, channel: SyncChannel, keys: StorageKeys) -> Self {
        Self {
            books: Vec::new(),
            available: 0,
            storage,
            channel,
            keys,
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn available(&self) -> usize {
        self.available
    }

    pub fn contains(&self, isbn: &str) -> bool {
        self.books.iter().any(|b| b.has_isbn(isbn))
    }

    pub fn instance_id(&self) -> usize {
        self.channel.instance_id()
    }

    /// Prepends the book. Adding a book already in the list adds it again.
    pub fn add(&mut self, book: Book, matches: &[Book]) {
        debug!(
            "Instance {} adds {} to the reading list",
            self.instance_id(),
            book.isbn
        );
        self.books.insert(0, book);
        self.available = count_available(matches, &self.books);
        self.persist();
        self.broadcast();
    }

    /// Removes every entry with the given ISBN.
    pub fn remove(&mut self, isbn: &str, matches: &[Book]) {
        debug!(
            "Instance {} removes {} from the reading list",
            self.instance_id(),
            isbn
        );
        self.books.retain(|b| !b.has_isbn(isbn));
        self.available = count_available(matches, &self.books);
        self.persist();
        self.broadcast();
    }

    /// Restores list and count from storage. Anything missing or malformed
    /// leaves the current state untouched. Returns whether state was restored.
    pub fn load_from_storage(&mut self) -> bool {
        match read_persisted_state(self.storage.as_ref(), &self.keys) {
            Ok(state) => {
                info!(
                    "Restored reading list with {} books ({} available)",
                    state.books.len(),
                    state.available
                );
                self.books = state.books;
                self.available = state.available;
                true
            }
            Err(PersistedStateError::Missing(key)) => {
                debug!("Nothing persisted under {}, starting empty", key);
                false
            }
            Err(err) => {
                warn!("Ignoring persisted reading list: {}", err);
                false
            }
        }
    }

    /// Replaces the list with one received from a sibling. Persists, does not
    /// broadcast.
    pub fn apply_remote_update(&mut self, books: Vec<Book>, matches: &[Book]) {
        debug!(
            "Instance {} received a reading list of {} books",
            self.instance_id(),
            books.len()
        );
        self.books = books;
        self.available = count_available(matches, &self.books);
        self.persist();
    }

    /// Recomputes the count in memory only.
    pub fn refresh_available(&mut self, matches: &[Book]) {
        self.available = count_available(matches, &self.books);
    }

    /// Next pending sibling update, without waiting.
    ///
    /// Messages that are not reading lists, or that fail to parse, are
    /// returned as errors so the caller can skip them.
    pub fn try_recv_remote(&mut self) -> Option<Result<Vec<Book>, SyncError>> {
        self.channel
            .try_recv()
            .map(|message| message.parse_reading_list())
    }

    pub async fn recv_remote(&mut self) -> Option<Result<Vec<Book>, SyncError>> {
        self.channel
            .recv()
            .await
            .map(|message| message.parse_reading_list())
    }

    pub fn close(&mut self) {
        self.channel.close();
    }

    fn persist(&self) {
        if let Err(err) =
            write_persisted_state(self.storage.as_ref(), &self.keys, &self.books, self.available)
        {
            error!("Failed to persist reading list: {:#}", err);
        }
    }

    fn broadcast(&self) {
        match self.channel.post(ChannelMessage::reading_list(&self.books)) {
            Ok(0) => {}
            Ok(failed) => debug!("{} siblings did not receive the reading list", failed),
            Err(err) => warn!("Reading list not broadcast: {}", err),
        }
    }
}
