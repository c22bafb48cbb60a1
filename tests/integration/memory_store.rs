//! In-memory `BookStore` used to drive the router without a database

use std::sync::Mutex;

use async_trait::async_trait;
use bookshelf_server::{
    error::AppResult,
    models::book::{Book, BookDraft, BookSearch},
    repository::BookStore,
};
use chrono::Utc;

#[derive(Default)]
pub struct MemoryStore {
    books: Mutex<Vec<Book>>,
    next_id: Mutex<i32>,
}

fn matches(book: &Book, term: &str) -> bool {
    let term = term.to_lowercase();
    let year = book.year.map(|y| y.to_string());
    let found = [Some(&book.title), Some(&book.author), book.genre.as_ref(), year.as_ref()]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&term));
    found
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn search(&self, search: &BookSearch) -> AppResult<(Vec<Book>, i64)> {
        let books = self.books.lock().unwrap();
        let matching: Vec<&Book> = books
            .iter()
            .filter(|b| search.term.as_deref().map_or(true, |t| matches(b, t)))
            .collect();
        let page = matching
            .iter()
            .skip(search.offset() as usize)
            .take(search.per_page as usize)
            .map(|b| (*b).clone())
            .collect();
        Ok((page, matching.len() as i64))
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        Ok(self.books.lock().unwrap().iter().find(|b| b.id == id).cloned())
    }

    async fn create(&self, draft: &BookDraft) -> AppResult<Book> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let now = Utc::now();
        let book = Book {
            id: *next_id,
            title: draft.title.clone(),
            author: draft.author.clone(),
            genre: draft.genre.clone(),
            year: draft.year,
            created_at: now,
            updated_at: now,
        };
        self.books.lock().unwrap().push(book.clone());
        Ok(book)
    }

    async fn update(&self, id: i32, draft: &BookDraft) -> AppResult<Option<Book>> {
        let mut books = self.books.lock().unwrap();
        Ok(books.iter_mut().find(|b| b.id == id).map(|book| {
            book.title = draft.title.clone();
            book.author = draft.author.clone();
            book.genre = draft.genre.clone();
            book.year = draft.year;
            book.updated_at = Utc::now();
            book.clone()
        }))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut books = self.books.lock().unwrap();
        let before = books.len();
        books.retain(|b| b.id != id);
        Ok(books.len() < before)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
