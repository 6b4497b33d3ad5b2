use std::sync::Arc;

use crate::auth::jwt::TokenSigner;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`). Key material lives here -- loaded once at startup, immutable
/// for the lifetime of the process, safe for unsynchronized concurrent reads.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: libris_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// RS256 token signer/validator built from the configured key pair.
    pub signer: Arc<TokenSigner>,
}
