//! Webhook endpoints for external collaborators.
//!
//! - POST `/webhooks/upgrade` - Payment provider callback upgrading a user
//!   to premium. Authenticated with `Authorization: ApiKey <key>`.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
};
use serde::Deserialize;

use super::error::{ApiError, ResultExt};
use crate::auth::api_key;
use crate::db::Database;

/// The only event this webhook acts on; everything else is acknowledged
/// and ignored.
const UPGRADE_EVENT: &str = "user.upgraded";

#[derive(Clone)]
pub struct WebhooksState {
    pub db: Database,
    pub api_key: String,
}

pub fn router(state: WebhooksState) -> Router {
    Router::new()
        .route("/webhooks/upgrade", post(upgrade_user))
        .with_state(state)
}

#[derive(Deserialize)]
struct UpgradeEvent {
    event: String,
    data: UpgradeData,
}

#[derive(Deserialize)]
struct UpgradeData {
    user_id: String,
}

/// Upgrade a user to premium when the provider reports `user.upgraded`.
async fn upgrade_user(
    State(state): State<WebhooksState>,
    headers: HeaderMap,
    Json(req): Json<UpgradeEvent>,
) -> Result<impl IntoResponse, ApiError> {
    let key = api_key(&headers).map_err(|e| ApiError::auth_failure("Webhook rejected", e))?;
    if key != state.api_key {
        return Err(ApiError::auth_failure("Webhook rejected", "api key mismatch"));
    }

    if req.event != UPGRADE_EVENT {
        return Ok(StatusCode::NO_CONTENT);
    }

    if uuid::Uuid::parse_str(&req.data.user_id).is_err() {
        return Err(ApiError::bad_request("Invalid user id"));
    }

    let upgraded = state
        .db
        .users()
        .upgrade(&req.data.user_id)
        .await
        .db_err("Failed to upgrade user")?;
    if !upgraded {
        return Err(ApiError::not_found("User not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}
