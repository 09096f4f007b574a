//! Catalog loading from the bundled JSON dataset.

use super::{Book, Catalog};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Deserialize)]
struct LibraryEntry {
    book: Book,
}

#[derive(Deserialize)]
struct LibraryFile {
    library: Vec<LibraryEntry>,
}

/// Parses a dataset of the form `{"library": [{"book": {...}}, ...]}`.
pub fn parse_catalog(content: &str) -> Result<Catalog> {
    let file: LibraryFile =
        serde_json::from_str(content).context("Failed to parse catalog JSON")?;
    let books = file.library.into_iter().map(|entry| entry.book).collect();
    Ok(Catalog::new(books)?)
}

pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    info!("Loading catalog from {:?}...", path);
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {:?}", path))?;
    let catalog =
        parse_catalog(&content).with_context(|| format!("Invalid catalog file: {:?}", path))?;

    let index = catalog.index();
    info!(
        "Catalog has:\n{} books\n{} genres\npages between {} and {}",
        catalog.get_books_count(),
        index.genres().len(),
        index.min_pages(),
        index.max_pages()
    );
    Ok(catalog)
}
