//! Repository for the `sessions` table.

use sqlx::PgPool;

use crate::models::session::{CreateSession, Session};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, refresh_token, refresh_token_expires_at, created_at, updated_at";

/// Provides create/find/delete operations for sessions.
///
/// Sessions are looked up and deleted by refresh token: the row is the
/// authority on whether a refresh token is still usable.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session, returning the created row.
    ///
    /// A refresh-token collision violates `uq_sessions_refresh_token` and
    /// surfaces as a database error.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (user_id, refresh_token, refresh_token_expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(input.user_id)
            .bind(&input.refresh_token)
            .bind(input.refresh_token_expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a session by its refresh token.
    pub async fn find_by_refresh_token(
        pool: &PgPool,
        refresh_token: &str,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sessions WHERE refresh_token = $1");
        sqlx::query_as::<_, Session>(&query)
            .bind(refresh_token)
            .fetch_optional(pool)
            .await
    }

    /// Delete the session matching a refresh token. Returns `true` if a row
    /// was deleted; `false` means the token was never issued or is already
    /// revoked.
    pub async fn delete_by_refresh_token(
        pool: &PgPool,
        refresh_token: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE refresh_token = $1")
            .bind(refresh_token)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
