//! Handlers for the `/users` resource.
//!
//! All routes operate on the authenticated user; the identity comes from
//! the bearer token, never from the request.

use axum::extract::State;
use axum::Json;
use libris_core::error::CoreError;
use libris_db::models::user::{UpdateUser, UserResponse};
use libris_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `PUT /users`.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: String,
    pub password: String,
}

/// Response body for `DELETE /users`.
#[derive(Debug, Serialize)]
pub struct DeleteUserResponse {
    pub message: &'static str,
}

/// GET /api/v1/users
///
/// Return the authenticated user's profile.
pub async fn get_self(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<UserResponse>> {
    let row = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "user" }))?;
    Ok(Json(UserResponse::from(row)))
}

/// PUT /api/v1/users
///
/// Update the authenticated user's username and password. A duplicate
/// username surfaces as 409 via the unique index.
pub async fn update_self(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    if input.username.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Username must not be empty".into(),
        )));
    }
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let update_dto = UpdateUser {
        username: input.username,
        password_hash: hashed,
    };
    let row = UserRepo::update(&state.pool, user.user_id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "user" }))?;

    Ok(Json(UserResponse::from(row)))
}

/// DELETE /api/v1/users
///
/// Delete the authenticated user's account. Their sessions go with it.
pub async fn delete_self(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DeleteUserResponse>> {
    let deleted = UserRepo::delete(&state.pool, user.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "user" }));
    }

    Ok(Json(DeleteUserResponse {
        message: "user deleted",
    }))
}
