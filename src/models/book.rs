//! Book model and the request types built around it

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationErrors};

use super::pagination::PaginationButton;
use crate::error::{AppError, AppResult};

pub const TITLE_REQUIRED: &str = "Please provide a \"Title\"";
pub const AUTHOR_REQUIRED: &str = "Please provide an \"Author\"";
pub const YEAR_NOT_A_NUMBER: &str = "Year must be a whole number";

/// Longest title, author or genre the books table accepts
pub const MAX_FIELD_LENGTH: usize = 255;

/// Book record as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Submitted book form, exactly as typed by the user.
///
/// Kept as text so a rejected submission can be shown again unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    pub genre: Option<String>,
    pub year: Option<String>,
}

/// Normalised book fields ready to be written
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct BookDraft {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1, max = 255))]
    pub author: String,
    #[validate(length(max = 255))]
    pub genre: Option<String>,
    pub year: Option<i32>,
}

/// Field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn too_long(label: &str) -> String {
    format!("{} must be at most {} characters", label, MAX_FIELD_LENGTH)
}

/// Flatten validator errors in form order, one message per field.
fn field_errors(draft: &BookDraft, errors: &ValidationErrors) -> Vec<FieldError> {
    let by_field = errors.field_errors();
    [
        ("title", "Title", draft.title.as_str(), TITLE_REQUIRED),
        ("author", "Author", draft.author.as_str(), AUTHOR_REQUIRED),
        ("genre", "Genre", draft.genre.as_deref().unwrap_or(""), ""),
    ]
    .into_iter()
    .filter(|(field, ..)| by_field.contains_key(*field))
    .map(|(field, label, value, required)| FieldError {
        field: field.to_string(),
        message: if value.is_empty() {
            required.to_string()
        } else {
            too_long(label)
        },
    })
    .collect()
}

/// Query-string integer where an empty value means "not given".
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

impl BookForm {
    /// Normalise and validate the submitted values.
    ///
    /// Title and author are trimmed and must not be blank. An empty genre or
    /// year becomes absent; a non-empty year must be an integer.
    pub fn to_draft(&self) -> Result<BookDraft, Vec<FieldError>> {
        let mut year_error = None;
        let year = match non_blank(&self.year) {
            Some(raw) => match raw.parse::<i32>() {
                Ok(year) => Some(year),
                Err(_) => {
                    year_error = Some(FieldError::new("year", YEAR_NOT_A_NUMBER));
                    None
                }
            },
            None => None,
        };

        let draft = BookDraft {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            genre: non_blank(&self.genre).map(str::to_string),
            year,
        };

        let mut errors = match draft.validate() {
            Ok(()) => Vec::new(),
            Err(e) => field_errors(&draft, &e),
        };
        errors.extend(year_error);

        if errors.is_empty() {
            Ok(draft)
        } else {
            Err(errors)
        }
    }
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
            year: book.year.map(|y| y.to_string()),
        }
    }
}

/// Listing query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Matched against title, author, genre and year
    pub search_term: Option<String>,
    /// 0-based page number
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page: Option<i64>,
    /// Books per page
    #[serde(rename = "bksToDisplay", default, deserialize_with = "empty_as_none")]
    pub bks_to_display: Option<i64>,
}

/// Resolved search: filter and window over the books table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSearch {
    pub term: Option<String>,
    pub page: i64,
    pub per_page: i64,
}

impl BookSearch {
    pub fn offset(&self) -> i64 {
        self.page * self.per_page
    }
}

impl BookQuery {
    /// Apply defaults and reject impossible paging.
    ///
    /// Paging is only honoured when both `page` and `bksToDisplay` are given;
    /// otherwise the first page of `default_page_size` books is used.
    pub fn resolve(&self, default_page_size: i64) -> AppResult<BookSearch> {
        if matches!(self.page, Some(p) if p < 0) {
            return Err(AppError::BadRequest("page must not be negative".to_string()));
        }
        if matches!(self.bks_to_display, Some(n) if n <= 0) {
            return Err(AppError::BadRequest("bksToDisplay must be positive".to_string()));
        }

        let (page, per_page) = match (self.page, self.bks_to_display) {
            (Some(page), Some(per_page)) => (page, per_page),
            _ => (0, default_page_size),
        };

        if page.checked_mul(per_page).is_none() {
            return Err(AppError::BadRequest("page is out of range".to_string()));
        }

        Ok(BookSearch {
            term: non_blank(&self.search_term).map(str::to_string),
            page,
            per_page,
        })
    }
}

/// One page of the book listing
#[derive(Debug, Serialize, ToSchema)]
pub struct BookPage {
    pub books: Vec<Book>,
    /// Rows matching the active filter
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub search_term: Option<String>,
    pub buttons: Vec<PaginationButton>,
    pub message: Option<String>,
}

/// Data for the create/update form
#[derive(Debug, Serialize, ToSchema)]
pub struct BookFormView {
    pub title: String,
    /// Set when editing an existing book
    pub id: Option<i32>,
    pub book: BookForm,
    pub errors: Vec<FieldError>,
}
