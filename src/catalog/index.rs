use super::Book;

/// Values derived once from the catalog: the genre selector contents and the
/// bounds of the page range control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogIndex {
    genres: Vec<String>,
    min_pages: u32,
    max_pages: u32,
}

/// An entry of the genre selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenreOption {
    All,
    Genre(String),
}

impl GenreOption {
    pub fn label(&self) -> &str {
        match self {
            GenreOption::All => "all genres",
            GenreOption::Genre(genre) => genre,
        }
    }

    /// The value the filter receives when this option is selected.
    pub fn selection(&self) -> Option<String> {
        match self {
            GenreOption::All => None,
            GenreOption::Genre(genre) => Some(genre.clone()),
        }
    }
}

impl CatalogIndex {
    /// Returns None for an empty book slice.
    pub fn build(books: &[Book]) -> Option<Self> {
        let min_pages = books.iter().map(|b| b.pages).min()?;
        let max_pages = books.iter().map(|b| b.pages).max()?;

        let mut genres: Vec<String> = Vec::new();
        for book in books {
            if !genres.iter().any(|g| g == &book.genre) {
                genres.push(book.genre.clone());
            }
        }

        Some(Self {
            genres,
            min_pages,
            max_pages,
        })
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn min_pages(&self) -> u32 {
        self.min_pages
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    pub fn genre_options(&self) -> Vec<GenreOption> {
        std::iter::once(GenreOption::All)
            .chain(self.genres.iter().cloned().map(GenreOption::Genre))
            .collect()
    }

    pub fn clamp_pages(&self, pages: u32) -> u32 {
        pages.clamp(self.min_pages, self.max_pages)
    }
}
