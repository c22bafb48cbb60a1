//! HTTP handlers and routing

pub mod books;
pub mod health;
pub mod openapi;

use axum::{
    http::Uri,
    routing::get,
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, AppState};

async fn page_not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri))
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(books::home))
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/books", get(books::list_books))
        .route(
            "/books/new-book",
            get(books::new_book_form).post(books::create_book),
        )
        .route("/books/:id", get(books::get_book))
        .route(
            "/books/:id/update-book",
            get(books::edit_book_form).post(books::update_book),
        )
        .route(
            "/books/:id/delete",
            get(books::confirm_delete).post(books::delete_book),
        )
        .with_state(state);

    Router::new()
        .merge(app)
        .merge(openapi::create_openapi_router())
        .fallback(page_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
