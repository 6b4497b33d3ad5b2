//! Request body integrity gate.
//!
//! Every `/api/v1` request must carry an `x-hmac` header: the hex
//! HMAC-SHA256 digest of the raw request body under the shared secret.
//! The check runs ahead of authentication and body parsing, so handlers
//! may assume the bytes they deserialize are authentic.

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use libris_core::error::CoreError;
use libris_core::integrity;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the client-computed body digest.
pub const INTEGRITY_HEADER: &str = "x-hmac";

/// Cap on buffered body size. Requests in this API are small JSON payloads;
/// anything larger is not a legitimate client.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Verify the `x-hmac` digest of the raw request body, then replay the
/// buffered bytes to the next layer so the handler re-parses the same body.
///
/// Missing or undecodable digests are 400; a well-formed digest that does
/// not match is 401.
pub async fn verify_body_digest(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let digest_hex = request
        .headers()
        .get(INTEGRITY_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::BadRequest(format!("Missing {INTEGRITY_HEADER} header")))?;

    let digest = integrity::decode_hex(digest_hex).ok_or_else(|| {
        AppError::BadRequest(format!("{INTEGRITY_HEADER} header is not valid hex"))
    })?;

    // Consume the body; the bytes are put back below.
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read request body: {e}")))?;

    if !integrity::verify_digest(&state.config.integrity.secret, &bytes, &digest) {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Request body failed integrity check".into(),
        )));
    }

    let request = Request::from_parts(parts, Body::from(bytes));
    Ok(next.run(request).await)
}
