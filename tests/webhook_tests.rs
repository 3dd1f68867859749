//! Tests for the upgrade webhook and the dev-only admin reset.

mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use common::{TEST_API_KEY, body_json, create_dev_test_app, create_test_app, register_user, send};
use serde_json::json;
use tower::ServiceExt;

async fn send_webhook(app: &Router, auth_header: Option<&str>, body: serde_json::Value) -> StatusCode {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/webhooks/upgrade")
        .header("content-type", "application/json");
    if let Some(value) = auth_header {
        builder = builder.header("authorization", value.to_string());
    }
    let response = app
        .clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();
    response.status()
}

#[tokio::test]
async fn test_upgrade_user() {
    let (app, db) = create_test_app().await;
    let id = register_user(&app, "alice@example.com", "password").await;

    let status = send_webhook(
        &app,
        Some(&format!("ApiKey {}", TEST_API_KEY)),
        json!({"event": "user.upgraded", "data": {"user_id": id}}),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let user = db.users().get_by_id(&id).await.unwrap().unwrap();
    assert!(user.is_premium);
}

#[tokio::test]
async fn test_upgrade_requires_api_key() {
    let (app, db) = create_test_app().await;
    let id = register_user(&app, "alice@example.com", "password").await;

    let status = send_webhook(
        &app,
        None,
        json!({"event": "user.upgraded", "data": {"user_id": id}}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let status = send_webhook(
        &app,
        Some("ApiKey wrong-key"),
        json!({"event": "user.upgraded", "data": {"user_id": id}}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let user = db.users().get_by_id(&id).await.unwrap().unwrap();
    assert!(!user.is_premium);
}

#[tokio::test]
async fn test_unknown_event_is_acknowledged_and_ignored() {
    let (app, db) = create_test_app().await;
    let id = register_user(&app, "alice@example.com", "password").await;

    let status = send_webhook(
        &app,
        Some(&format!("ApiKey {}", TEST_API_KEY)),
        json!({"event": "user.downgraded", "data": {"user_id": id}}),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let user = db.users().get_by_id(&id).await.unwrap().unwrap();
    assert!(!user.is_premium);
}

#[tokio::test]
async fn test_upgrade_unknown_user() {
    let (app, _db) = create_test_app().await;

    let status = send_webhook(
        &app,
        Some(&format!("ApiKey {}", TEST_API_KEY)),
        json!({"event": "user.upgraded", "data": {"user_id": uuid::Uuid::new_v4().to_string()}}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_reset_refused_outside_dev_mode() {
    let (app, db) = create_test_app().await;
    let id = register_user(&app, "alice@example.com", "password").await;

    let response = send(&app, "POST", "/api/admin/reset", None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(db.users().get_by_id(&id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_admin_reset_in_dev_mode() {
    let (app, db) = create_dev_test_app().await;
    let id = register_user(&app, "alice@example.com", "password").await;

    let response = send(&app, "POST", "/api/admin/reset", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(db.users().get_by_id(&id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_login_response_reflects_premium() {
    let (app, _db) = create_test_app().await;
    let id = register_user(&app, "alice@example.com", "password").await;

    send_webhook(
        &app,
        Some(&format!("ApiKey {}", TEST_API_KEY)),
        json!({"event": "user.upgraded", "data": {"user_id": id}}),
    )
    .await;

    let response = common::send_json(
        &app,
        "POST",
        "/api/login",
        None,
        json!({"email": "alice@example.com", "password": "password"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["is_premium"], true);
}
