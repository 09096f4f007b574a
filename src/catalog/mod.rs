mod book;
#[allow(clippy::module_inception)]
mod catalog;
mod index;
mod load;

pub use book::{Author, Book};
pub use catalog::{Catalog, CatalogError};
pub use index::{CatalogIndex, GenreOption};
pub use load::{load_catalog, parse_catalog};
