//! Session model and DTOs.

use libris_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A session row from the `sessions` table.
///
/// One row per issued refresh token. The row is the durable anchor for the
/// token's validity: deleting it revokes the refresh token even if the
/// token's embedded expiry has not elapsed. Access tokens are minted per
/// request and never stored here.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token: String,
    pub refresh_token_expires_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new session.
pub struct CreateSession {
    pub user_id: DbId,
    pub refresh_token: String,
    pub refresh_token_expires_at: Timestamp,
}
