//! Bookshelf service: create, list, read, update and delete book records

use crate::{
    error::{AppError, AppResult},
    models::book::{new_book_id, now, Book, BookPayload, BookQuery, BookSummary, BookViolation},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Validate and store a new book, returning its id
    pub async fn create_book(&self, payload: BookPayload) -> AppResult<String> {
        let payload = payload
            .validated()
            .map_err(|violations| validation_error("Gagal menambahkan buku", &violations))?;

        let id = new_book_id();
        let book = Book::create(id.clone(), payload, now());

        if !self.repository.books.insert(book).await {
            return Err(AppError::Internal("Buku gagal ditambahkan".to_string()));
        }

        tracing::info!(book_id = %id, "Book added");
        Ok(id)
    }

    /// Summaries of the stored books, see [`BooksRepository::search`](crate::repository::books::BooksRepository::search)
    pub async fn list_books(&self, query: &BookQuery) -> Vec<BookSummary> {
        self.repository.books.search(query).await
    }

    pub async fn get_book(&self, id: &str) -> AppResult<Book> {
        self.repository
            .books
            .get(id)
            .await
            .ok_or_else(|| AppError::NotFound("Buku tidak ditemukan".to_string()))
    }

    /// Replace every editable field of an existing book.
    /// The payload is validated before the id is looked up.
    pub async fn update_book(&self, id: &str, payload: BookPayload) -> AppResult<Book> {
        let payload = payload
            .validated()
            .map_err(|violations| validation_error("Gagal memperbarui buku", &violations))?;

        let book = self
            .repository
            .books
            .update(id, payload, now())
            .await
            .ok_or_else(|| AppError::NotFound("Gagal memperbarui buku. Id tidak ditemukan".to_string()))?;

        tracing::info!(book_id = %id, finished = book.finished, "Book updated");
        Ok(book)
    }

    pub async fn delete_book(&self, id: &str) -> AppResult<()> {
        self.repository
            .books
            .delete(id)
            .await
            .ok_or_else(|| AppError::NotFound("Buku gagal dihapus. Id tidak ditemukan".to_string()))?;

        tracing::info!(book_id = %id, "Book deleted");
        Ok(())
    }

    pub async fn count(&self) -> usize {
        self.repository.books.count().await
    }
}

/// Report the highest-precedence violation, prefixed by the failed action
fn validation_error(action: &str, violations: &[BookViolation]) -> AppError {
    let reason = violations
        .first()
        .map(BookViolation::reason)
        .unwrap_or("Invalid book");
    AppError::Validation(format!("{}. {}", action, reason))
}
