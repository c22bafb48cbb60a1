//! Book endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookForm, BookFormView, BookPage, BookQuery},
    services::catalog::{CreateOutcome, DeleteOutcome, RejectedBook, UpdateOutcome},
    AppState,
};

const BOOKS_PATH: &str = "/books";
const NEW_BOOK_TITLE: &str = "New Book";
const UPDATE_BOOK_TITLE: &str = "Update Book";

/// Path ids that are not numbers cannot name a book.
pub fn parse_id(raw: &str) -> AppResult<i32> {
    raw.parse::<i32>()
        .map_err(|_| AppError::NotFound(format!("Book {} not found", raw)))
}

async fn load_book(state: &AppState, raw_id: &str) -> AppResult<Book> {
    let id = parse_id(raw_id)?;
    state
        .services
        .catalog
        .find_book(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
}

fn rejected_form(title: &str, rejected: RejectedBook) -> Response {
    let view = BookFormView {
        title: title.to_string(),
        id: rejected.id,
        book: rejected.values,
        errors: rejected.errors,
    };
    (StatusCode::UNPROCESSABLE_ENTITY, Json(view)).into_response()
}

pub async fn home() -> Redirect {
    Redirect::to(BOOKS_PATH)
}

/// List books with search and pagination
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "One page of books", body = BookPage),
        (status = 400, description = "Invalid paging")
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<BookPage>> {
    let page = state.services.catalog.search_books(&query).await?;
    Ok(Json(page))
}

/// Blank form for a new book
#[utoipa::path(
    get,
    path = "/books/new-book",
    tag = "books",
    responses(
        (status = 200, description = "Empty book form", body = BookFormView)
    )
)]
pub async fn new_book_form() -> Json<BookFormView> {
    Json(BookFormView {
        title: NEW_BOOK_TITLE.to_string(),
        id: None,
        book: BookForm::default(),
        errors: Vec::new(),
    })
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books/new-book",
    tag = "books",
    request_body(content = BookForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Book created, redirects to /books"),
        (status = 422, description = "Invalid fields, form returned with errors", body = BookFormView)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    match state.services.catalog.create_book(form).await? {
        CreateOutcome::Created(_) => Ok(Redirect::to(BOOKS_PATH).into_response()),
        CreateOutcome::Rejected(rejected) => Ok(rejected_form(NEW_BOOK_TITLE, rejected)),
    }
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Book>> {
    let book = load_book(&state, &id).await?;
    Ok(Json(book))
}

/// Form pre-filled with an existing book
#[utoipa::path(
    get,
    path = "/books/{id}/update-book",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book form", body = BookFormView),
        (status = 404, description = "Book not found")
    )
)]
pub async fn edit_book_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<BookFormView>> {
    let book = load_book(&state, &id).await?;
    Ok(Json(BookFormView {
        title: UPDATE_BOOK_TITLE.to_string(),
        id: Some(book.id),
        book: BookForm::from(&book),
        errors: Vec::new(),
    }))
}

/// Update an existing book
#[utoipa::path(
    post,
    path = "/books/{id}/update-book",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body(content = BookForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Book updated, redirects to /books"),
        (status = 404, description = "Book not found"),
        (status = 422, description = "Invalid fields, form returned with errors", body = BookFormView)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    match state.services.catalog.update_book(id, form).await? {
        UpdateOutcome::Updated(_) => Ok(Redirect::to(BOOKS_PATH).into_response()),
        UpdateOutcome::Rejected(rejected) => Ok(rejected_form(UPDATE_BOOK_TITLE, rejected)),
        UpdateOutcome::NotFound => Err(AppError::NotFound(format!("Book {} not found", id))),
    }
}

/// Book about to be deleted
#[utoipa::path(
    get,
    path = "/books/{id}/delete",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book to confirm deletion of", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn confirm_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Book>> {
    let book = load_book(&state, &id).await?;
    Ok(Json(book))
}

/// Delete a book
#[utoipa::path(
    post,
    path = "/books/{id}/delete",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 303, description = "Book deleted, redirects to /books"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Redirect> {
    let id = parse_id(&id)?;
    match state.services.catalog.delete_book(id).await? {
        DeleteOutcome::Deleted => Ok(Redirect::to(BOOKS_PATH)),
        DeleteOutcome::NotFound => Err(AppError::NotFound(format!("Book {} not found", id))),
    }
}
