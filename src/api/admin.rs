//! Admin endpoints.
//!
//! - POST `/admin/reset` - Delete all users (dev deployments only)

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Router};
use tracing::info;

use super::error::{ApiError, ResultExt};
use crate::db::Database;

#[derive(Clone)]
pub struct AdminState {
    pub db: Database,
    pub dev_mode: bool,
}

pub fn router(state: AdminState) -> Router {
    Router::new()
        .route("/admin/reset", post(reset))
        .with_state(state)
}

/// Wipe all users (posts and refresh tokens cascade). Refused outside dev.
async fn reset(State(state): State<AdminState>) -> Result<impl IntoResponse, ApiError> {
    if !state.dev_mode {
        return Err(ApiError::forbidden("Reset is only available in dev mode"));
    }

    let deleted = state
        .db
        .users()
        .delete_all()
        .await
        .db_err("Failed to reset users")?;
    info!(deleted, "Reset complete");

    Ok(StatusCode::OK)
}
