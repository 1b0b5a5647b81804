//! Repository layer for book records

pub mod books;

/// Main repository struct holding the record stores
#[derive(Clone, Default)]
pub struct Repository {
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a repository with an empty in-memory book store
    pub fn new() -> Self {
        Self {
            books: books::BooksRepository::new(),
        }
    }
}
