//! Domain primitives shared by the persistence and HTTP layers.
//!
//! This crate has no internal dependencies so both `libris-db` and
//! `libris-api` (and any future CLI tooling) can use it freely.

pub mod error;
pub mod integrity;
pub mod types;
