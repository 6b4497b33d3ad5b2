//! HTTP-level integration tests for the author and book CRUD endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth, put_json_auth};
use sqlx::PgPool;

/// Create an author via the API and return its id.
async fn create_author(pool: &PgPool, token: &str, name: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/authors",
        serde_json::json!({ "name": name, "birth_date": "1920-01-02" }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Author CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_author_returns_201(pool: PgPool) {
    let token = common::auth_token(&pool, "writer").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/authors",
        serde_json::json!({ "name": "Isaac Asimov", "birth_date": "1920-01-02" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Isaac Asimov");
    assert_eq!(json["birth_date"], "1920-01-02");
    assert!(json["id"].is_number());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_author_by_id(pool: PgPool) {
    let token = common::auth_token(&pool, "writer").await;
    let id = create_author(&pool, &token, "Ursula K. Le Guin").await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/authors/{id}"), &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Ursula K. Le Guin");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_nonexistent_author_returns_404(pool: PgPool) {
    let token = common::auth_token(&pool, "writer").await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/authors/999999", &token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_author(pool: PgPool) {
    let token = common::auth_token(&pool, "writer").await;
    let id = create_author(&pool, &token, "Original Name").await;

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/v1/authors/{id}"),
        serde_json::json!({ "name": "Updated Name", "birth_date": "1931-05-15" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Updated Name");
    assert_eq!(json["birth_date"], "1931-05-15");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_author_returns_204(pool: PgPool) {
    let token = common::auth_token(&pool, "writer").await;
    let id = create_author(&pool, &token, "Delete Me").await;

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/authors/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Subsequent GET should 404.
    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/authors/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_authors(pool: PgPool) {
    let token = common::auth_token(&pool, "writer").await;
    create_author(&pool, &token, "A1").await;
    create_author(&pool, &token, "A2").await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/authors", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().expect("array response").len(), 2);
}

// ---------------------------------------------------------------------------
// Book CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_book_returns_201(pool: PgPool) {
    let token = common::auth_token(&pool, "reader").await;
    let author_id = create_author(&pool, &token, "Frank Herbert").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/books",
        serde_json::json!({ "isbn": "9780441172719", "title": "Dune", "author_id": author_id }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["isbn"], "9780441172719");
    assert_eq!(json["title"], "Dune");
    assert_eq!(json["author_id"], author_id);
}

/// A book referencing a nonexistent author is 404, not an FK error.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_book_unknown_author_returns_404(pool: PgPool) {
    let token = common::auth_token(&pool, "reader").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/books",
        serde_json::json!({ "isbn": "9780441172719", "title": "Dune", "author_id": 999999 }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Creating two books with the same ISBN returns 409 for the second.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_book_duplicate_isbn_returns_409(pool: PgPool) {
    let token = common::auth_token(&pool, "reader").await;
    let author_id = create_author(&pool, &token, "Frank Herbert").await;

    let body =
        serde_json::json!({ "isbn": "9780441172719", "title": "Dune", "author_id": author_id });

    let app = common::build_test_app(pool.clone());
    let first = post_json_auth(app, "/api/v1/books", body.clone(), &token).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let second = post_json_auth(app, "/api/v1/books", body, &token).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_book(pool: PgPool) {
    let token = common::auth_token(&pool, "reader").await;
    let author_id = create_author(&pool, &token, "Frank Herbert").await;

    let app = common::build_test_app(pool.clone());
    let created = post_json_auth(
        app,
        "/api/v1/books",
        serde_json::json!({ "isbn": "9780441172719", "title": "Dune", "author_id": author_id }),
        &token,
    )
    .await;
    let id = body_json(created).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/v1/books/{id}"),
        serde_json::json!({
            "isbn": "9780441172720",
            "title": "Dune Messiah",
            "author_id": author_id
        }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Dune Messiah");
    assert_eq!(json["isbn"], "9780441172720");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_book_returns_204(pool: PgPool) {
    let token = common::auth_token(&pool, "reader").await;
    let author_id = create_author(&pool, &token, "Frank Herbert").await;

    let app = common::build_test_app(pool.clone());
    let created = post_json_auth(
        app,
        "/api/v1/books",
        serde_json::json!({ "isbn": "9780441172719", "title": "Dune", "author_id": author_id }),
        &token,
    )
    .await;
    let id = body_json(created).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = delete_auth(app, &format!("/api/v1/books/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// ---------------------------------------------------------------------------
// User self-service
// ---------------------------------------------------------------------------

/// PUT /users updates the profile; the new password works for login.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_own_profile(pool: PgPool) {
    let (_id, password) = common::create_test_user(&pool, "lena").await;
    let login = common::login_user(common::build_test_app(pool.clone()), "lena", &password).await;
    let token = login["access_token"].as_str().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        "/api/v1/users",
        serde_json::json!({ "username": "lena2", "password": "new_password_456!" }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["username"], "lena2");

    let relogin = common::login_user(
        common::build_test_app(pool),
        "lena2",
        "new_password_456!",
    )
    .await;
    assert!(relogin["access_token"].as_str().is_some());
}

/// DELETE /users removes the account; the login stops working.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_own_account(pool: PgPool) {
    let (_id, password) = common::create_test_user(&pool, "mona").await;
    let login = common::login_user(common::build_test_app(pool.clone()), "mona", &password).await;
    let token = login["access_token"].as_str().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, "/api/v1/users", token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let relogin = common::post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "username": "mona", "password": password }),
    )
    .await;
    assert_eq!(relogin.status(), StatusCode::UNAUTHORIZED);
}
