//! Data models for Bookshelf

pub mod book;
pub mod pagination;

// Re-export commonly used types
pub use book::{Book, BookDraft, BookForm, BookFormView, BookPage, BookQuery, BookSearch, FieldError};
pub use pagination::PaginationButton;
