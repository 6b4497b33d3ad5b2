//! Handlers for the `/books` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use libris_core::error::CoreError;
use libris_core::types::DbId;
use libris_db::models::book::{Book, CreateBook, UpdateBook};
use libris_db::repositories::{AuthorRepo, BookRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Reject empty ISBNs and titles before they hit the database.
fn validate_book_fields(isbn: &str, title: &str) -> Result<(), AppError> {
    if isbn.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "ISBN must not be empty".into(),
        )));
    }
    if title.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Title must not be empty".into(),
        )));
    }
    Ok(())
}

/// POST /api/v1/books
///
/// The referenced author must exist (404 otherwise); a duplicate ISBN
/// surfaces as 409 via the unique index.
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    validate_book_fields(&input.isbn, &input.title)?;

    AuthorRepo::find_by_id(&state.pool, input.author_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "author" }))?;

    let book = BookRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// GET /api/v1/books
pub async fn list(State(state): State<AppState>, _user: AuthUser) -> AppResult<Json<Vec<Book>>> {
    let books = BookRepo::list(&state.pool).await?;
    Ok(Json(books))
}

/// GET /api/v1/books/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Book>> {
    let book = BookRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "book" }))?;
    Ok(Json(book))
}

/// PUT /api/v1/books/{id}
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBook>,
) -> AppResult<Json<Book>> {
    validate_book_fields(&input.isbn, &input.title)?;

    AuthorRepo::find_by_id(&state.pool, input.author_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "author" }))?;

    let book = BookRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "book" }))?;
    Ok(Json(book))
}

/// DELETE /api/v1/books/{id}
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = BookRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "book" }))
    }
}
