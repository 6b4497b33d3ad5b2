//! Author entity model and DTOs.

use chrono::NaiveDate;
use libris_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An author row from the `authors` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Author {
    pub id: DbId,
    pub name: String,
    pub birth_date: NaiveDate,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new author.
#[derive(Debug, Deserialize)]
pub struct CreateAuthor {
    pub name: String,
    pub birth_date: NaiveDate,
}

/// DTO for updating an existing author.
#[derive(Debug, Deserialize)]
pub struct UpdateAuthor {
    pub name: String,
    pub birth_date: NaiveDate,
}
