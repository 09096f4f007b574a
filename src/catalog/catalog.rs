use super::{Book, CatalogIndex};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("The catalog contains no books")]
    Empty,

    #[error("Duplicate ISBN in catalog: {0}")]
    DuplicateIsbn(String),
}

/// The immutable book collection together with its derived index.
#[derive(Debug)]
pub struct Catalog {
    books: Vec<Book>,
    index: CatalogIndex,
}

impl Catalog {
    pub fn new(books: Vec<Book>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(books.len());
        for book in &books {
            if !seen.insert(book.isbn.as_str()) {
                return Err(CatalogError::DuplicateIsbn(book.isbn.clone()));
            }
        }

        let index = CatalogIndex::build(&books).ok_or(CatalogError::Empty)?;
        Ok(Self { books, index })
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    pub fn get_book(&self, isbn: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.has_isbn(isbn))
    }

    pub fn get_books_count(&self) -> usize {
        self.books.len()
    }
}
