mod admin;
mod error;
mod posts;
mod tokens;
mod users;
mod webhooks;

use axum::{Router, http::StatusCode, routing::get};
use std::sync::Arc;

use crate::db::Database;
use crate::jwt::JwtConfig;

/// Create the API router.
pub fn create_api_router(
    db: Database,
    jwt: Arc<JwtConfig>,
    api_key: String,
    dev_mode: bool,
) -> Router {
    let users_state = users::UsersState {
        db: db.clone(),
        jwt: jwt.clone(),
    };

    let posts_state = posts::PostsState {
        db: db.clone(),
        jwt: jwt.clone(),
    };

    let tokens_state = tokens::TokensState {
        db: db.clone(),
        jwt,
    };

    let webhooks_state = webhooks::WebhooksState {
        db: db.clone(),
        api_key,
    };

    let admin_state = admin::AdminState { db, dev_mode };

    Router::new()
        .route("/healthz", get(healthz))
        .merge(users::router(users_state))
        .merge(posts::router(posts_state))
        .merge(tokens::router(tokens_state))
        .merge(webhooks::router(webhooks_state))
        .merge(admin::router(admin_state))
}

async fn healthz() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
