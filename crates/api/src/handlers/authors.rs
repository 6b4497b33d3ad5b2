//! Handlers for the `/authors` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use libris_core::error::CoreError;
use libris_core::types::DbId;
use libris_db::models::author::{Author, CreateAuthor, UpdateAuthor};
use libris_db::repositories::AuthorRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/authors
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<CreateAuthor>,
) -> AppResult<(StatusCode, Json<Author>)> {
    if input.name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Author name must not be empty".into(),
        )));
    }

    let author = AuthorRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(author)))
}

/// GET /api/v1/authors
pub async fn list(State(state): State<AppState>, _user: AuthUser) -> AppResult<Json<Vec<Author>>> {
    let authors = AuthorRepo::list(&state.pool).await?;
    Ok(Json(authors))
}

/// GET /api/v1/authors/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Author>> {
    let author = AuthorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "author" }))?;
    Ok(Json(author))
}

/// PUT /api/v1/authors/{id}
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAuthor>,
) -> AppResult<Json<Author>> {
    if input.name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Author name must not be empty".into(),
        )));
    }

    let author = AuthorRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "author" }))?;
    Ok(Json(author))
}

/// DELETE /api/v1/authors/{id}
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = AuthorRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "author" }))
    }
}
