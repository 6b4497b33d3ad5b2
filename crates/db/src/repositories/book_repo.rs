//! Repository for the `books` table.

use libris_core::types::DbId;
use sqlx::PgPool;

use crate::models::book::{Book, CreateBook, UpdateBook};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, isbn, title, author_id, created_at, updated_at";

/// Provides CRUD operations for books.
pub struct BookRepo;

impl BookRepo {
    /// Insert a new book, returning the created row.
    ///
    /// A duplicate ISBN violates `uq_books_isbn` and surfaces as a database
    /// error; the referenced author must exist (checked by the handler so a
    /// missing author maps to 404, not an FK failure).
    pub async fn create(pool: &PgPool, input: &CreateBook) -> Result<Book, sqlx::Error> {
        let query = format!(
            "INSERT INTO books (isbn, title, author_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(&input.isbn)
            .bind(&input.title)
            .bind(input.author_id)
            .fetch_one(pool)
            .await
    }

    /// Find a book by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Book>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM books WHERE id = $1");
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a book by its ISBN.
    pub async fn find_by_isbn(pool: &PgPool, isbn: &str) -> Result<Option<Book>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM books WHERE isbn = $1");
        sqlx::query_as::<_, Book>(&query)
            .bind(isbn)
            .fetch_optional(pool)
            .await
    }

    /// List all books ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Book>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM books ORDER BY created_at DESC");
        sqlx::query_as::<_, Book>(&query).fetch_all(pool).await
    }

    /// Update a book. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBook,
    ) -> Result<Option<Book>, sqlx::Error> {
        let query = format!(
            "UPDATE books SET
                isbn = $2,
                title = $3,
                author_id = $4,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .bind(&input.isbn)
            .bind(&input.title)
            .bind(input.author_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a book. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
