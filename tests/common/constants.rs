//! Shared constants for end-to-end tests
//!
//! When the fixture catalog changes, update only this file.

// ============================================================================
// Test Catalog
// ============================================================================

/// "Book A", Fiction, 200 pages
pub const ISBN_A: &str = "978-0000000001";

/// "Book B", Fiction, 400 pages
pub const ISBN_B: &str = "978-0000000002";

/// "Book C", Drama, 300 pages
pub const ISBN_C: &str = "978-0000000003";

pub const GENRE_FICTION: &str = "Fiction";
pub const GENRE_DRAMA: &str = "Drama";

pub const MIN_PAGES: u32 = 200;
pub const MAX_PAGES: u32 = 400;

pub const CATALOG_JSON: &str = r#"{
  "library": [
    {
      "book": {
        "title": "Book A",
        "pages": 200,
        "genre": "Fiction",
        "cover": "https://covers.example.org/a.jpg",
        "synopsis": "The first one.",
        "year": 1965,
        "ISBN": "978-0000000001",
        "author": { "name": "Author A", "otherBooks": ["Book A II"] }
      }
    },
    {
      "book": {
        "title": "Book B",
        "pages": 400,
        "genre": "Fiction",
        "cover": "https://covers.example.org/b.jpg",
        "synopsis": "The long one.",
        "year": 1990,
        "ISBN": "978-0000000002",
        "author": { "name": "Author B", "otherBooks": [] }
      }
    },
    {
      "book": {
        "title": "Book C",
        "pages": 300,
        "genre": "Drama",
        "cover": "https://covers.example.org/c.jpg",
        "synopsis": "The sad one.",
        "year": 2001,
        "ISBN": "978-0000000003",
        "author": { "name": "Author C", "otherBooks": ["Book C II", "Book C III"] }
      }
    }
  ]
}"#;
