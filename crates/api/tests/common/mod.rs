//! Shared helpers for HTTP-level integration tests.
//!
//! Requests are driven through `tower::ServiceExt::oneshot` against the
//! full production router (CORS, request ID, timeout, tracing, panic
//! recovery, body integrity check), so tests exercise the same stack the
//! binary serves. Every helper signs the request body with the development
//! integrity secret; the `*_unsigned` variants exist so tests can assert
//! the integrity gate itself.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;

use libris_api::auth::jwt::{JwtConfig, TokenSigner};
use libris_api::config::{IntegrityConfig, ServerConfig};
use libris_api::middleware::integrity::INTEGRITY_HEADER;
use libris_api::router::build_app_router;
use libris_api::state::AppState;
use libris_core::integrity;

/// Development key material committed under `cert/`.
const PRIVATE_PEM: &[u8] = include_bytes!("../../../../cert/id_rsa.pri");
const PUBLIC_PEM: &[u8] = include_bytes!("../../../../cert/id_rsa.pub");
const INTEGRITY_SECRET: &[u8] = include_bytes!("../../../../cert/hmac.key");

/// Build a test `ServerConfig` with safe defaults and the dev key material.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            private_key_file: "../../cert/id_rsa.pri".to_string(),
            public_key_file: "../../cert/id_rsa.pub".to_string(),
            access_token_expiry_mins: 5,
            refresh_token_expiry_hours: 24,
        },
        integrity: IntegrityConfig {
            secret: INTEGRITY_SECRET.to_vec(),
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Mirrors the construction in `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let signer = TokenSigner::from_pems(
        PRIVATE_PEM,
        PUBLIC_PEM,
        config.jwt.access_token_expiry_mins,
        config.jwt.refresh_token_expiry_hours,
    )
    .expect("dev key pair should parse");

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        signer: Arc::new(signer),
    };

    build_app_router(state, &config)
}

/// A token signer matching the one inside the test app, for decoding the
/// tokens that come back in responses.
pub fn test_signer() -> TokenSigner {
    TokenSigner::from_pems(PRIVATE_PEM, PUBLIC_PEM, 5, 24).expect("dev key pair should parse")
}

/// Hex digest of `body` under the dev integrity secret.
pub fn sign_body(body: &[u8]) -> String {
    integrity::compute_digest(INTEGRITY_SECRET, body)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a request with the given method/uri/body, a valid integrity digest,
/// and an optional bearer token.
pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    body: Vec<u8>,
    bearer: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(INTEGRITY_HEADER, sign_body(&body));

    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = builder.body(Body::from(body)).expect("request builds");
    app.oneshot(request).await.expect("request completes")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, "GET", uri, Vec::new(), None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "GET", uri, Vec::new(), Some(token)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, "POST", uri, body.to_string().into_bytes(), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, "POST", uri, body.to_string().into_bytes(), Some(token)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, "PUT", uri, body.to_string().into_bytes(), Some(token)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "DELETE", uri, Vec::new(), Some(token)).await
}

/// Send a POST without any integrity digest header.
pub async fn post_json_unsigned(
    app: Router,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds");
    app.oneshot(request).await.expect("request completes")
}

/// Send a POST with an explicit (possibly wrong) digest header value.
pub async fn post_json_with_digest(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    digest: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(INTEGRITY_HEADER, digest)
        .body(Body::from(body.to_string()))
        .expect("request builds");
    app.oneshot(request).await.expect("request completes")
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is valid JSON")
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a user via the signup endpoint and return (id, password).
pub async fn create_test_user(pool: &PgPool, username: &str) -> (i64, String) {
    let password = "test_password_123!";
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/signup",
        serde_json::json!({ "username": username, "password": password }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    (json["id"].as_i64().unwrap(), password.to_string())
}

/// Log in a user via the API and return the JSON response containing
/// `refresh_token`, `access_token`, and `hmac_secret_key`.
pub async fn login_user(app: Router, username: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

/// Create a user, log in, and return a bearer access token.
pub async fn auth_token(pool: &PgPool, username: &str) -> String {
    let (_id, password) = create_test_user(pool, username).await;
    let login = login_user(build_test_app(pool.clone()), username, &password).await;
    login["access_token"].as_str().unwrap().to_string()
}
