//! Route definitions for the `/authors` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::authors;
use crate::state::AppState;

/// Routes mounted at `/authors`.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create
/// GET    /{id}  -> get_by_id
/// PUT    /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(authors::list).post(authors::create))
        .route(
            "/{id}",
            get(authors::get_by_id)
                .put(authors::update)
                .delete(authors::delete),
        )
}
