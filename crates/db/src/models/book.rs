//! Book entity model and DTOs.

use libris_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A book row from the `books` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Book {
    pub id: DbId,
    pub isbn: String,
    pub title: String,
    pub author_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new book.
#[derive(Debug, Deserialize)]
pub struct CreateBook {
    pub isbn: String,
    pub title: String,
    pub author_id: DbId,
}

/// DTO for updating an existing book.
#[derive(Debug, Deserialize)]
pub struct UpdateBook {
    pub isbn: String,
    pub title: String,
    pub author_id: DbId,
}
