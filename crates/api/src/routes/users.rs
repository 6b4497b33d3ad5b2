//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`. All operate on the authenticated user.
///
/// ```text
/// GET    / -> get_self
/// PUT    / -> update_self
/// DELETE / -> delete_self
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(users::get_self)
            .put(users::update_self)
            .delete(users::delete_self),
    )
}
