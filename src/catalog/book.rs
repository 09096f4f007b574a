use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub other_books: Vec<String>,
}

/// A single catalog entry.
///
/// Field names on the wire follow the bundled dataset (`ISBN`, `otherBooks`),
/// the same shape is used for persisted and broadcast reading lists.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    pub title: String,
    pub pages: u32,
    pub genre: String,
    pub cover: String,
    pub synopsis: String,
    pub year: i32,
    #[serde(rename = "ISBN")]
    pub isbn: String,
    pub author: Author,
}

impl Book {
    pub fn has_isbn(&self, isbn: &str) -> bool {
        self.isbn == isbn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_dataset_field_names() {
        let json = r#"{
            "title": "El Señor de los Anillos",
            "pages": 1200,
            "genre": "Fantasía",
            "cover": "https://example.com/lotr.jpg",
            "synopsis": "Una aventura épica.",
            "year": 1954,
            "ISBN": "978-0618640157",
            "author": { "name": "J.R.R. Tolkien", "otherBooks": ["El Hobbit"] }
        }"#;

        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.isbn, "978-0618640157");
        assert_eq!(book.pages, 1200);
        assert_eq!(book.author.other_books, vec!["El Hobbit".to_string()]);
    }

    #[test]
    fn serializes_isbn_uppercase() {
        let book = Book {
            title: "t".to_string(),
            pages: 1,
            genre: "g".to_string(),
            cover: String::new(),
            synopsis: String::new(),
            year: 2000,
            isbn: "X".to_string(),
            author: Author {
                name: "a".to_string(),
                other_books: vec![],
            },
        };
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["ISBN"], "X");
        assert!(json["author"]["otherBooks"].is_array());
    }

    #[test]
    fn missing_other_books_defaults_to_empty() {
        let json = r#"{"title":"t","pages":3,"genre":"g","cover":"","synopsis":"","year":1,
            "ISBN":"I","author":{"name":"n"}}"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert!(book.author.other_books.is_empty());
    }
}
