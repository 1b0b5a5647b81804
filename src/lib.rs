//! Bookshelf record server
//!
//! An in-memory store of book records exposed through a REST JSON API:
//! create, list (with filters), read, update and delete.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Build state around a fresh, empty book store
    pub fn new() -> Self {
        Self {
            services: Arc::new(services::Services::new(repository::Repository::new())),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
