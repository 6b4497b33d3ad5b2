//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the repositories in `libris_db` and map errors
//! via [`crate::error::AppError`].

pub mod auth;
pub mod authors;
pub mod books;
pub mod users;
