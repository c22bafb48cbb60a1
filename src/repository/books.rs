//! Books repository for database operations.

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::BookStore;
use crate::{
    error::AppResult,
    models::book::{Book, BookDraft, BookSearch},
};

const BOOK_COLUMNS: &str = "id, title, author, genre, year, created_at, updated_at";

/// Free-text filter. The year is matched through its decimal text, so
/// "19" finds every book from the 1900s as well as 2019.
const SEARCH_FILTER: &str = "title ILIKE $1 OR author ILIKE $1 OR genre ILIKE $1 \
                             OR CAST(year AS TEXT) ILIKE $1";

/// Wrap a search term for `ILIKE`, escaping its wildcards.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn count_sql(filtered: bool) -> String {
    if filtered {
        format!("SELECT COUNT(*) FROM books WHERE {}", SEARCH_FILTER)
    } else {
        "SELECT COUNT(*) FROM books".to_string()
    }
}

fn page_sql(filtered: bool) -> String {
    if filtered {
        format!(
            "SELECT {} FROM books WHERE {} ORDER BY id LIMIT $2 OFFSET $3",
            BOOK_COLUMNS, SEARCH_FILTER
        )
    } else {
        format!("SELECT {} FROM books ORDER BY id LIMIT $1 OFFSET $2", BOOK_COLUMNS)
    }
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn search(&self, search: &BookSearch) -> AppResult<(Vec<Book>, i64)> {
        let pattern = search.term.as_deref().map(like_pattern);
        let filtered = pattern.is_some();

        let count_query = count_sql(filtered);
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(ref pattern) = pattern {
            count = count.bind(pattern);
        }
        let total = count.fetch_one(&self.pool).await?;

        let select_query = page_sql(filtered);
        let mut select = sqlx::query_as::<_, Book>(&select_query);
        if let Some(ref pattern) = pattern {
            select = select.bind(pattern);
        }
        let books = select
            .bind(search.per_page)
            .bind(search.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((books, total))
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let query = format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS);
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn create(&self, draft: &BookDraft) -> AppResult<Book> {
        let query = format!(
            r#"
            INSERT INTO books (title, author, genre, year)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(&draft.title)
            .bind(&draft.author)
            .bind(&draft.genre)
            .bind(draft.year)
            .fetch_one(&self.pool)
            .await?;
        Ok(book)
    }

    async fn update(&self, id: i32, draft: &BookDraft) -> AppResult<Option<Book>> {
        let query = format!(
            r#"
            UPDATE books
            SET title = $1, author = $2, genre = $3, year = $4, updated_at = NOW()
            WHERE id = $5
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(&draft.title)
            .bind(&draft.author)
            .bind(&draft.genre)
            .bind(draft.year)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
