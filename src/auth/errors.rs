//! Authentication and authorization error responses.
//!
//! All authentication-stage failures collapse to a single 401 at the
//! boundary. The internal cause is logged, never echoed to the client, so a
//! caller cannot distinguish "expired" from "revoked" or "unknown user".

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

/// Rejection for the [`super::Auth`] extractor: uniform 401.
#[derive(Debug)]
pub struct AuthRejection;

impl AuthRejection {
    /// Log the real cause server-side and collapse it to the generic 401.
    pub fn log(cause: impl std::fmt::Display) -> Self {
        tracing::debug!(cause = %cause, "authentication failed");
        Self
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "Unauthorized",
            }),
        )
            .into_response()
    }
}

/// Authenticated identity does not own the targeted resource.
///
/// Distinct from authentication failure: the caller proved who they are, but
/// may not touch this resource. Maps to 403, never 401.
#[derive(Debug, Error)]
#[error("authenticated user does not own this resource")]
pub struct OwnershipViolation;

impl IntoResponse for OwnershipViolation {
    fn into_response(self) -> Response {
        (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse { error: "Forbidden" }),
        )
            .into_response()
    }
}
