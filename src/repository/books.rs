//! In-memory book store.
//!
//! Records are kept in insertion order behind a single async read/write lock.
//! Every method takes the lock once, so each call observes and mutates a
//! consistent snapshot of the collection.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::models::book::{Book, BookPayload, BookQuery, BookSummary};

#[derive(Clone, Default)]
pub struct BooksRepository {
    books: Arc<RwLock<Vec<Book>>>,
}

impl BooksRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and report whether it can be found afterwards
    pub async fn insert(&self, book: Book) -> bool {
        let mut books = self.books.write().await;
        let id = book.id.clone();
        books.push(book);
        books.iter().any(|b| b.id == id)
    }

    /// Summaries for the list endpoint.
    ///
    /// Only the first supplied filter is applied. When no filter is supplied, or
    /// the applied one matches nothing, every record is returned.
    pub async fn search(&self, query: &BookQuery) -> Vec<BookSummary> {
        let books = self.books.read().await;

        if let Some(filter) = query.filter() {
            tracing::debug!(?filter, "Filtering books");
            let matched: Vec<BookSummary> = books
                .iter()
                .filter(|b| filter.matches(b))
                .map(BookSummary::from)
                .collect();
            if !matched.is_empty() {
                return matched;
            }
        }

        books.iter().map(BookSummary::from).collect()
    }

    pub async fn get(&self, id: &str) -> Option<Book> {
        self.books.read().await.iter().find(|b| b.id == id).cloned()
    }

    /// Replace the editable fields of the record `id`, returning the new state
    pub async fn update(&self, id: &str, payload: BookPayload, at: DateTime<Utc>) -> Option<Book> {
        let mut books = self.books.write().await;
        let book = books.iter_mut().find(|b| b.id == id)?;
        book.apply(payload, at);
        Some(book.clone())
    }

    /// Remove the record `id`, returning it
    pub async fn delete(&self, id: &str) -> Option<Book> {
        let mut books = self.books.write().await;
        let index = books.iter().position(|b| b.id == id)?;
        Some(books.remove(index))
    }

    pub async fn count(&self) -> usize {
        self.books.read().await.len()
    }
}
