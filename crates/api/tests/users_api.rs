//! HTTP tests for attendee login and session enforcement.

mod common;

use axum::http::StatusCode;
use common::{body_json, expect_status, get, get_auth, login_player, post_json};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_first_login_creates_account(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, account) = login_player(&app, "attendee-1").await;

    assert!(!token.is_empty());
    assert_eq!(account["nickname"], "attendee-1");
    assert_eq!(account["current_level"], 0);
    assert_eq!(account["unlock_level"], 2);
    assert!(account.get("auth_token").is_none());

    let json = expect_status(get_auth(app, "/api/v1/users/me", &token).await, StatusCode::OK).await;
    assert_eq!(json["data"]["id"], account["id"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_second_login_reuses_account(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, first) = login_player(&app, "attendee-1").await;
    let (_, second) = login_player(&app, "attendee-1").await;

    assert_eq!(first["id"], second["id"]);
    assert_eq!(first["qrcode_token"], second["qrcode_token"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rejected_identity_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/users/session",
        serde_json::json!({ "token": "forged" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "INVALID_TOKEN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_token_is_validation_error(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/users/session", serde_json::json!({ "token": "" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_and_garbage_bearer(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/v1/users/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app, "/api/v1/users/me", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}
