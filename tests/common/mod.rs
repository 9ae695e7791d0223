#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use tower::ServiceExt;

use lasertag_api::config::{Config, Environment, MatchPolicy};
use lasertag_api::state::AppState;

/// Test configuration with the given policy.
pub fn test_config(match_policy: MatchPolicy) -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        server_host: std::net::IpAddr::from([127, 0, 0, 1]),
        server_port: 0,
        environment: Environment::Development,
        log_level: "warn".to_string(),
        cors_origins: lasertag_api::cors::default_origins(),
        match_policy,
    }
}

/// Build application state backed by an in-memory `SQLite` database with migrations.
pub async fn test_state(match_policy: MatchPolicy) -> AppState {
    let db = lasertag_api::db::connect("sqlite::memory:")
        .await
        .unwrap_or_default();
    Migrator::up(&db, None).await.unwrap_or_default();

    AppState::new(db, test_config(match_policy))
}

/// Build the full app over a database whose schema was never created, so every
/// store call fails.
pub async fn test_app_without_schema() -> Router {
    let db = lasertag_api::db::connect("sqlite::memory:")
        .await
        .unwrap_or_default();

    lasertag_api::app(AppState::new(db, test_config(MatchPolicy::Permissive)))
}

/// Build the full app (routes + middleware) with the given policy.
pub async fn test_app_with_policy(match_policy: MatchPolicy) -> Router {
    lasertag_api::app(test_state(match_policy).await)
}

/// Build the full app with the default permissive policy.
pub async fn test_app() -> Router {
    test_app_with_policy(MatchPolicy::Permissive).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap_or_default();

    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .unwrap_or_default();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);

    (status, json)
}

/// Test helper: send a GET request to the app and return (status, JSON body).
pub async fn get(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap_or_default();

    send(app, request).await
}

/// Test helper: POST a JSON body and return (status, JSON body).
pub async fn post_json(
    app: &Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap_or_default();

    send(app, request).await
}

/// Test helper: POST a raw body with the given content type.
pub async fn post_raw(
    app: &Router,
    uri: &str,
    content_type: &str,
    body: &'static str,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body))
        .unwrap_or_default();

    send(app, request).await
}

/// Create a match through the API and return its `gameId`.
pub async fn start_match(app: &Router, player1: &str, player2: &str) -> String {
    let (status, json) = post_json(
        app,
        "/game/start",
        &serde_json::json!({ "player1Name": player1, "player2Name": player2 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "start failed: {json}");
    json["gameId"].as_str().unwrap_or_default().to_string()
}
