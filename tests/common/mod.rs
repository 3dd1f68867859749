#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use crier::{ServerConfig, create_app, db::Database};
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &[u8] = b"test-jwt-secret";
pub const TEST_API_KEY: &str = "f271c81ff7084ee5b99a5091b42d486e";

/// Create a test app backed by an in-memory database.
pub async fn create_test_app() -> (Router, Database) {
    let db = Database::open(":memory:")
        .await
        .expect("Failed to open test database");
    let config = ServerConfig {
        db: db.clone(),
        jwt_secret: TEST_JWT_SECRET.to_vec(),
        api_key: TEST_API_KEY.to_string(),
        dev_mode: false,
    };
    (create_app(&config), db)
}

/// Create a test app with dev mode enabled.
pub async fn create_dev_test_app() -> (Router, Database) {
    let db = Database::open(":memory:")
        .await
        .expect("Failed to open test database");
    let config = ServerConfig {
        db: db.clone(),
        jwt_secret: TEST_JWT_SECRET.to_vec(),
        api_key: TEST_API_KEY.to_string(),
        dev_mode: true,
    };
    (create_app(&config), db)
}

/// Send a JSON request, optionally with a bearer token.
pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    bearer: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = bearer {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    app.clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

/// Send a bodyless request, optionally with a bearer token.
pub async fn send(app: &Router, method: &str, uri: &str, bearer: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register a user and return their id.
pub async fn register_user(app: &Router, email: &str, password: &str) -> String {
    let response = send_json(
        app,
        "POST",
        "/api/users",
        None,
        serde_json::json!({"email": email, "password": password}),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    let json = body_json(response).await;
    json["id"].as_str().unwrap().to_string()
}

/// Log a user in and return (access_token, refresh_token).
pub async fn login_user(app: &Router, email: &str, password: &str) -> (String, String) {
    let response = send_json(
        app,
        "POST",
        "/api/login",
        None,
        serde_json::json!({"email": email, "password": password}),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let json = body_json(response).await;
    (
        json["token"].as_str().unwrap().to_string(),
        json["refresh_token"].as_str().unwrap().to_string(),
    )
}
