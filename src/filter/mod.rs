//! Genre and page-count filtering over the catalog.

use crate::catalog::{Book, Catalog};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterSelection {
    /// None means all genres.
    pub genre: Option<String>,
    pub max_pages: u32,
}

/// Returns the books satisfying `selection`, in catalog order.
///
/// With a genre selected the page bound is exclusive, without one it is
/// inclusive. Both behaviors are observable by users and kept as-is.
pub fn compute_matches(books: &[Book], selection: &FilterSelection) -> Vec<Book> {
    match &selection.genre {
        Some(genre) => books
            .iter()
            .filter(|b| &b.genre == genre && b.pages < selection.max_pages)
            .cloned()
            .collect(),
        None => books
            .iter()
            .filter(|b| b.pages <= selection.max_pages)
            .cloned()
            .collect(),
    }
}

/// Current filter selection plus the matches it produces.
///
/// Every setter recomputes the matches; nothing else is touched.
pub struct FilterState {
    catalog: Arc<Catalog>,
    selection: FilterSelection,
    matches: Vec<Book>,
}

impl FilterState {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let selection = FilterSelection {
            genre: None,
            max_pages: catalog.index().max_pages(),
        };
        let matches = compute_matches(catalog.books(), &selection);
        Self {
            catalog,
            selection,
            matches,
        }
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn matches(&self) -> &[Book] {
        &self.matches
    }

    /// An empty genre string is the "all genres" option.
    pub fn set_genre(&mut self, genre: Option<String>) {
        self.selection.genre = genre.filter(|g| !g.is_empty());
        self.recompute();
    }

    pub fn set_max_pages(&mut self, max_pages: u32) {
        let clamped = self.catalog.index().clamp_pages(max_pages);
        if clamped != max_pages {
            debug!("Clamped max pages {} to {}", max_pages, clamped);
        }
        self.selection.max_pages = clamped;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.matches = compute_matches(self.catalog.books(), &self.selection);
        debug!(
            "Filter {:?} yields {} matches",
            self.selection,
            self.matches.len()
        );
    }
}
