#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use internhub_api::auth::jwt::JwtConfig;
use internhub_api::auth::password::WorkFactor;
use internhub_api::config::{parse_origins, ServerConfig};
use internhub_api::router::build_app_router;
use internhub_api::state::AppState;
use internhub_db::{DbConfig, Store};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const PASSWORD: &str = "Secret1!";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default) and
/// a tiny Argon2 cost so the suite stays fast.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: parse_origins("http://localhost:5173").unwrap(),
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            expiry_hours: 24,
        },
        work_factor: WorkFactor {
            memory_kib: 256,
            iterations: 1,
            parallelism: 1,
        },
        database: DbConfig {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            database: "unused".to_string(),
            user: "unused".to_string(),
            password: String::new(),
            ssl: false,
            max_connections: 1,
            acquire_timeout_secs: 1,
        },
    }
}

/// The full application router backed by the given store.
pub fn build_test_app_with(store: Store) -> Router {
    let state = AppState::new(test_config(), store).unwrap();
    build_app_router(state)
}

/// The full application router backed by a fresh in-memory store.
pub fn build_test_app() -> Router {
    build_test_app_with(Store::in_memory())
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the status and the `{ message }` envelope, returning the message.
pub async fn expect_error(response: Response<Body>, status: StatusCode) -> String {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    json["message"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Sign up a user with the given role and return the session token.
pub async fn signup_as(app: &Router, email: &str, role: &str) -> String {
    let response = post_json(
        app.clone(),
        "/api/auth/signup",
        json!({ "name": "Test User", "email": email, "password": PASSWORD, "role": role }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["token"].as_str().unwrap().to_string()
}

pub fn internship_body(title: &str) -> Value {
    json!({
        "title": title,
        "skills": ["React", "Node.js"],
        "duration": "3 months",
        "mode": "Remote",
        "stipend": "10k/month",
    })
}
