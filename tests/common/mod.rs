//! Common test infrastructure
//!
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{TestShelf, ISBN_A};
//!
//! let shelf = TestShelf::with_sqlite();
//! let mut tab = shelf.open_tab();
//! tab.add(ISBN_A).unwrap();
//! ```

mod constants;
mod fixtures;

pub use constants::*;
pub use fixtures::TestShelf;
