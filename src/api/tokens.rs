//! Session token API endpoints.
//!
//! - POST `/refresh` - Exchange a refresh token for a new access token
//! - POST `/revoke` - Revoke a refresh token
//!
//! Both read the refresh token from `Authorization: Bearer <token>`. The
//! refresh token is not rotated on use: it stays valid until its own expiry
//! or an explicit revoke.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

use super::error::ApiError;
use crate::auth::bearer_token;
use crate::db::{Database, RefreshTokenError};
use crate::jwt::{ACCESS_TOKEN_TTL, JwtConfig};

#[derive(Clone)]
pub struct TokensState {
    pub db: Database,
    pub jwt: Arc<JwtConfig>,
}

pub fn router(state: TokensState) -> Router {
    Router::new()
        .route("/refresh", post(refresh))
        .route("/revoke", post(revoke))
        .with_state(state)
}

#[derive(Serialize)]
struct RefreshResponse {
    token: String,
}

/// Mint a new access token from a valid refresh token.
///
/// Missing, unknown, expired and revoked tokens all answer the same 401.
async fn refresh(
    State(state): State<TokensState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let refresh_token =
        bearer_token(&headers).map_err(|e| ApiError::auth_failure("Refresh rejected", e))?;

    let user_id = state
        .db
        .refresh_tokens()
        .resolve_user(refresh_token)
        .await
        .map_err(|e| match e {
            RefreshTokenError::NotFound | RefreshTokenError::Expired | RefreshTokenError::Revoked => {
                ApiError::auth_failure("Refresh rejected", e)
            }
            e => ApiError::db_error("Failed to look up refresh token", e),
        })?;

    let user_id = Uuid::parse_str(&user_id)
        .map_err(|e| ApiError::db_error("Stored user id is not a UUID", e))?;

    let token = state
        .jwt
        .issue_access_token(user_id, ACCESS_TOKEN_TTL)
        .map_err(|e| {
            error!("Failed to issue access token: {}", e);
            ApiError::internal("Failed to issue token")
        })?;

    Ok((StatusCode::OK, Json(RefreshResponse { token })))
}

/// Revoke a refresh token. 204 on success, also for an already-revoked
/// token; 401 when the header is missing or the token is unknown.
async fn revoke(
    State(state): State<TokensState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let refresh_token =
        bearer_token(&headers).map_err(|e| ApiError::auth_failure("Revoke rejected", e))?;

    state
        .db
        .refresh_tokens()
        .revoke(refresh_token)
        .await
        .map_err(|e| match e {
            RefreshTokenError::NotFound | RefreshTokenError::Expired | RefreshTokenError::Revoked => {
                ApiError::auth_failure("Revoke rejected", e)
            }
            e => ApiError::db_error("Failed to revoke refresh token", e),
        })?;

    Ok(StatusCode::NO_CONTENT)
}
