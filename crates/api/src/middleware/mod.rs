//! Request-gating middleware.
//!
//! - [`integrity::verify_body_digest`] -- keyed-hash check of the raw body,
//!   applied to every `/api/v1` request ahead of authentication.
//! - [`auth::AuthUser`] -- extracts the authenticated user from a Bearer
//!   token on protected routes.

pub mod auth;
pub mod integrity;
