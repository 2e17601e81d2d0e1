//! Shared scaffolding for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use quest_core::clock::FixedClock;
use quest_core::game_config::GameConfig;
use quest_core::identity::{ExternalIdentity, IdentityError, IdentityProvider};
use sqlx::PgPool;
use tower::ServiceExt;

use quest_api::auth::jwt::JwtConfig;
use quest_api::config::ServerConfig;
use quest_api::router::build_app_router;
use quest_api::state::AppState;

/// Accepts any token of the form `valid-<user id>`.
pub struct StubIdentityProvider;

#[async_trait]
impl IdentityProvider for StubIdentityProvider {
    async fn resolve(&self, token: &str) -> Result<ExternalIdentity, IdentityError> {
        match token.strip_prefix("valid-") {
            Some(user_id) if !user_id.is_empty() => Ok(ExternalIdentity {
                user_id: user_id.to_string(),
            }),
            _ => Err(IdentityError::InvalidToken),
        }
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 60,
        },
        opass_url: "http://opass.invalid".to_string(),
        game_config_path: "unused".to_string(),
        friend_capacity_multiplier: None,
    }
}

/// Four short levels (level 1 takes 30 s), one single-copy reward at level 1,
/// accounts start with two levels unlocked.
pub fn test_game() -> GameConfig {
    GameConfig::from_json(
        r#"{
            "initial_unlock_level": 2,
            "friend_capacity_multiplier": 3,
            "levels": [
                {"level": 1, "speed": 60, "notes": 30},
                {"level": 2, "speed": 60, "notes": 4},
                {"level": 3, "speed": 60, "notes": 4},
                {"level": 4, "speed": 60, "notes": 4}
            ],
            "discount_rules": [
                {"id": "level-1", "pass_level": 1, "amount": 50, "max_qty": 1, "description": "First clear"},
                {"id": "level-2", "pass_level": 2, "amount": 100, "max_qty": 10}
            ],
            "sheet_music": ["C4", "D4", "E4", "F4", "G4", "A4", "B4", "C5",
                            "C4", "D4", "E4", "F4", "G4", "A4", "B4", "C5",
                            "C4", "D4", "E4", "F4", "G4", "A4", "B4", "C5",
                            "C4", "D4", "E4", "F4", "G4", "A4"]
        }"#,
    )
    .unwrap()
}

/// Instant the test clock starts at.
pub fn start_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 7, 9, 0, 0).unwrap()
}

/// Full application router plus the clock it reads from.
pub fn build_test_app_with_clock(pool: PgPool) -> (Router, Arc<FixedClock>) {
    let config = test_config();
    let clock = Arc::new(FixedClock::new(start_time()));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        game: Arc::new(test_game()),
        clock: clock.clone(),
        identity: Arc::new(StubIdentityProvider),
    };

    (build_app_router(state, &config), clock)
}

/// Full application router with the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_clock(pool).0
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, token: Option<&str>, body: Option<serde_json::Value>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: serde_json::Value, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the status and return the parsed body.
pub async fn expect_status(response: Response, status: StatusCode) -> serde_json::Value {
    let actual = response.status();
    let json = body_json(response).await;
    assert_eq!(actual, status, "unexpected status, body: {json}");
    json
}

// ---------------------------------------------------------------------------
// Session helpers
// ---------------------------------------------------------------------------

/// Log an attendee in through the API. Returns (access token, account json).
pub async fn login_player(app: &Router, external_id: &str) -> (String, serde_json::Value) {
    let response = post_json(
        app.clone(),
        "/api/v1/users/session",
        serde_json::json!({ "token": format!("valid-{external_id}") }),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    let token = json["data"]["access_token"].as_str().unwrap().to_string();
    (token, json["data"]["principal"].clone())
}
