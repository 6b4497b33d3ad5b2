//! Handlers for the `/auth` resource (login, signup, refresh, logout).
//!
//! This is the session lifecycle: login mints a refresh/access token pair
//! and persists the session row; refresh exchanges a live refresh token for
//! a new access token; logout deletes the session row, revoking the refresh
//! token regardless of its embedded expiry.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use libris_core::error::CoreError;
use libris_core::integrity;
use libris_db::models::session::CreateSession;
use libris_db::models::user::{CreateUser, UserResponse};
use libris_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh` and `POST /auth/logout`.
#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Successful login response.
///
/// Carries the integrity secret (hex) so the client can sign the bodies of
/// its subsequent requests.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub refresh_token: String,
    pub access_token: String,
    pub hmac_secret_key: String,
}

/// Successful refresh response: the same refresh token with a fresh access
/// token.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub refresh_token: String,
    pub access_token: String,
}

/// Successful logout response.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: &'static str,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Mints a refresh/access token pair
/// and persists a session row anchored to the refresh token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    // Unknown usernames and wrong passwords both surface as the one
    // Credentials error; only the logs tell them apart.
    let user = match UserRepo::find_by_username(&state.pool, &input.username).await? {
        Some(user) => user,
        None => {
            tracing::info!(username = %input.username, "login attempt for unknown username");
            return Err(AppError::Core(CoreError::Credentials));
        }
    };

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "login attempt with wrong password");
        return Err(AppError::Core(CoreError::Credentials));
    }

    // Both tokens are minted from the same instant so their lifetimes are
    // offsets of one timestamp.
    let now = Utc::now();
    let refresh_token = state
        .signer
        .create_token(user.id, now, state.signer.refresh_token_ttl())
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let access_token = state
        .signer
        .create_token(user.id, now, state.signer.access_token_ttl())
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let session_input = CreateSession {
        user_id: user.id,
        refresh_token: refresh_token.clone(),
        refresh_token_expires_at: now + state.signer.refresh_token_ttl(),
    };
    SessionRepo::create(&state.pool, &session_input).await?;

    Ok(Json(LoginResponse {
        refresh_token,
        access_token,
        hmac_secret_key: integrity::encode_hex(&state.config.integrity.secret),
    }))
}

/// POST /api/v1/auth/signup
///
/// Create a new user account. The password is hashed before storage and
/// never returned.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    if input.username.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Username must not be empty".into(),
        )));
    }
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        username: input.username,
        password_hash: hashed,
    };
    let user = UserRepo::create(&state.pool, &create_dto).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a live refresh token for a new access token. The session row is
/// the authority here: the refresh token's own signature and embedded expiry
/// are not re-checked, but a deleted row makes the token unusable.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshTokenRequest>,
) -> AppResult<Json<RefreshResponse>> {
    let session = SessionRepo::find_by_refresh_token(&state.pool, &input.refresh_token)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "session" }))?;

    let now = Utc::now();
    let access_token = state
        .signer
        .create_token(session.user_id, now, state.signer.access_token_ttl())
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(RefreshResponse {
        refresh_token: session.refresh_token,
        access_token,
    }))
}

/// POST /api/v1/auth/logout
///
/// Delete the session row for the given refresh token. Logout of an unknown
/// or already-logged-out token is an error, not a no-op.
pub async fn logout(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<RefreshTokenRequest>,
) -> AppResult<Json<LogoutResponse>> {
    let deleted = SessionRepo::delete_by_refresh_token(&state.pool, &input.refresh_token).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "session" }));
    }

    Ok(Json(LogoutResponse {
        message: "logged out",
    }))
}
