//! Catalog management service

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookForm, BookPage, BookQuery, FieldError},
        pagination::pagination_buttons,
    },
    repository::BookStore,
};

/// A submission that failed validation, returned for redisplay
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedBook {
    /// Book being edited, `None` for a new book
    pub id: Option<i32>,
    /// Values as submitted
    pub values: BookForm,
    pub errors: Vec<FieldError>,
}

#[derive(Debug)]
pub enum CreateOutcome {
    Created(Book),
    Rejected(RejectedBook),
}

#[derive(Debug)]
pub enum UpdateOutcome {
    Updated(Book),
    Rejected(RejectedBook),
    NotFound,
}

#[derive(Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// User-facing summary of a search.
pub fn search_message(term: &str, total: i64) -> String {
    match total {
        0 => format!("no books matching \"{}\"", term),
        1 => format!("1 book matching \"{}\"", term),
        n => format!("{} books matching \"{}\"", n, term),
    }
}

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn BookStore>,
    default_page_size: i64,
}

impl CatalogService {
    pub fn new(store: Arc<dyn BookStore>, default_page_size: i64) -> Self {
        Self {
            store,
            default_page_size,
        }
    }

    /// List books, optionally filtered, one page at a time
    pub async fn search_books(&self, query: &BookQuery) -> AppResult<BookPage> {
        let search = query.resolve(self.default_page_size)?;
        let (books, total) = self.store.search(&search).await?;

        tracing::debug!(
            term = ?search.term,
            page = search.page,
            per_page = search.per_page,
            total,
            "Book search"
        );

        let message = search.term.as_deref().map(|term| search_message(term, total));

        Ok(BookPage {
            books,
            total,
            page: search.page,
            per_page: search.per_page,
            buttons: pagination_buttons(total, search.page, search.per_page),
            search_term: search.term,
            message,
        })
    }

    pub async fn find_book(&self, id: i32) -> AppResult<Option<Book>> {
        self.store.get_by_id(id).await
    }

    /// Validate and store a new book
    pub async fn create_book(&self, form: BookForm) -> AppResult<CreateOutcome> {
        let draft = match form.to_draft() {
            Ok(draft) => draft,
            Err(errors) => {
                tracing::debug!("Book creation rejected: {:?}", errors);
                return Ok(CreateOutcome::Rejected(RejectedBook {
                    id: None,
                    values: form,
                    errors,
                }));
            }
        };

        let book = self.store.create(&draft).await?;
        tracing::info!("Book {} created: {}", book.id, book.title);
        Ok(CreateOutcome::Created(book))
    }

    /// Replace all fields of an existing book.
    ///
    /// The book is looked up before the form is validated, so an unknown id
    /// is always `NotFound`.
    pub async fn update_book(&self, id: i32, form: BookForm) -> AppResult<UpdateOutcome> {
        if self.store.get_by_id(id).await?.is_none() {
            return Ok(UpdateOutcome::NotFound);
        }

        let draft = match form.to_draft() {
            Ok(draft) => draft,
            Err(errors) => {
                tracing::debug!("Book {} update rejected: {:?}", id, errors);
                return Ok(UpdateOutcome::Rejected(RejectedBook {
                    id: Some(id),
                    values: form,
                    errors,
                }));
            }
        };

        match self.store.update(id, &draft).await? {
            Some(book) => {
                tracing::info!("Book {} updated", id);
                Ok(UpdateOutcome::Updated(book))
            }
            // Deleted between lookup and write
            None => Ok(UpdateOutcome::NotFound),
        }
    }

    pub async fn delete_book(&self, id: i32) -> AppResult<DeleteOutcome> {
        if self.store.get_by_id(id).await?.is_none() {
            return Ok(DeleteOutcome::NotFound);
        }

        if self.store.delete(id).await? {
            tracing::info!("Book {} deleted", id);
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::NotFound)
        }
    }

    /// Check that the store answers
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
