//! Bookshelf Book Catalog
//!
//! Lists, searches, paginates, creates, updates and deletes book records
//! stored in PostgreSQL.

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
    pub fn new(config: &AppConfig, store: Arc<dyn repository::BookStore>) -> Self {
        Self {
            services: Arc::new(services::Services::new(store, &config.catalog)),
        }
    }
}
