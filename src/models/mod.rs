//! Data models for Bookshelf

pub mod book;
pub mod response;

// Re-export commonly used types
pub use book::{Book, BookFilter, BookPayload, BookQuery, BookSummary, BookViolation};
pub use response::{MessageResponse, ResponseStatus};
