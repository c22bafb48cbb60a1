//! Repository layer for database operations

pub mod books;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::book::{Book, BookDraft, BookSearch},
};

/// Persistence operations the catalog needs from its store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Page of books matching the search, with the total number of matches
    async fn search(&self, search: &BookSearch) -> AppResult<(Vec<Book>, i64)>;

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>>;

    async fn create(&self, draft: &BookDraft) -> AppResult<Book>;

    /// Replace every field of a book. `None` when the row no longer exists.
    async fn update(&self, id: i32, draft: &BookDraft) -> AppResult<Option<Book>>;

    /// Returns whether a row was removed
    async fn delete(&self, id: i32) -> AppResult<bool>;

    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            pool,
        }
    }

    /// Apply pending schema migrations
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}
