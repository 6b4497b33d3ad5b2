//! Route definitions.

pub mod auth;
pub mod authors;
pub mod books;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login      login (public)
/// /auth/signup     signup (public)
/// /auth/refresh    refresh (public)
/// /auth/logout     logout (requires auth)
///
/// /users           get, update, delete own profile (requires auth)
///
/// /authors         list, create (requires auth)
/// /authors/{id}    get, update, delete (requires auth)
///
/// /books           list, create (requires auth)
/// /books/{id}      get, update, delete (requires auth)
/// ```
///
/// The body integrity layer wraps this entire tree; see
/// [`crate::router::build_app_router`].
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/authors", authors::router())
        .nest("/books", books::router())
}
