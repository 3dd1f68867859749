//! User account API endpoints.
//!
//! - POST `/users` - Register with email + password
//! - PUT `/users` - Update own email + password (access token required)
//! - POST `/login` - Verify password, issue access + refresh tokens

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

use super::error::{ApiError, ResultExt};
use crate::auth::{self, Auth};
use crate::db::{Database, User};
use crate::impl_has_auth_state;
use crate::jwt::{ACCESS_TOKEN_TTL, JwtConfig};

#[derive(Clone)]
pub struct UsersState {
    pub db: Database,
    pub jwt: Arc<JwtConfig>,
}

impl_has_auth_state!(UsersState);

pub fn router(state: UsersState) -> Router {
    Router::new()
        .route("/users", post(create_user).put(update_user))
        .route("/login", post(login))
        .with_state(state)
}

#[derive(Deserialize)]
struct CredentialsRequest {
    email: String,
    password: String,
}

/// Public view of a user. Never carries the password hash.
#[derive(Serialize)]
struct UserResponse {
    id: String,
    email: String,
    is_premium: bool,
    created_at: String,
    updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_premium: user.is_premium,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Serialize)]
struct LoginResponse {
    #[serde(flatten)]
    user: UserResponse,
    token: String,
    refresh_token: String,
}

fn validate_credentials(req: &CredentialsRequest) -> Result<(), ApiError> {
    if req.email.is_empty() || !req.email.contains('@') {
        return Err(ApiError::bad_request("Invalid email address"));
    }
    if req.password.is_empty() {
        return Err(ApiError::bad_request("Password cannot be empty"));
    }
    Ok(())
}

/// Register a new user.
async fn create_user(
    State(state): State<UsersState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_credentials(&req)?;

    let hashed = auth::hash_password(&req.password)
        .map_err(|e| ApiError::hashing_error("Failed to hash password", e))?;

    let id = Uuid::new_v4().to_string();
    let user = match state.db.users().create(&id, &req.email, &hashed).await {
        Ok(user) => user,
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            return Err(ApiError::conflict("Email already registered"));
        }
        Err(e) => return Err(ApiError::db_error("Failed to create user", e)),
    };

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Update the authenticated user's email and password.
async fn update_user(
    State(state): State<UsersState>,
    Auth(user_id): Auth,
    Json(req): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_credentials(&req)?;

    let hashed = auth::hash_password(&req.password)
        .map_err(|e| ApiError::hashing_error("Failed to hash password", e))?;

    let id = user_id.to_string();
    let updated = state
        .db
        .users()
        .update_credentials(&id, &req.email, &hashed)
        .await
        .db_err("Failed to update user")?;
    if !updated {
        return Err(ApiError::not_found("User not found"));
    }

    let user = state
        .db
        .users()
        .get_by_id(&id)
        .await
        .db_err("Failed to get user")?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok((StatusCode::OK, Json(UserResponse::from(user))))
}

/// Log in with email and password.
///
/// On success returns the user plus a fresh access token and a persisted
/// refresh token. Unknown email and wrong password are indistinguishable to
/// the caller.
async fn login(
    State(state): State<UsersState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .db
        .users()
        .get_by_email(&req.email)
        .await
        .db_err("Failed to get user")?
        .ok_or_else(|| ApiError::unauthorized("Incorrect email or password"))?;

    let matches = auth::verify_password(&req.password, &user.hashed_password)
        .map_err(|e| ApiError::hashing_error("Failed to verify password", e))?;
    if !matches {
        return Err(ApiError::unauthorized("Incorrect email or password"));
    }

    let user_id = Uuid::parse_str(&user.id)
        .map_err(|e| ApiError::db_error("Stored user id is not a UUID", e))?;

    let token = state
        .jwt
        .issue_access_token(user_id, ACCESS_TOKEN_TTL)
        .map_err(|e| {
            error!("Failed to issue access token: {}", e);
            ApiError::internal("Failed to issue token")
        })?;

    let refresh = state
        .db
        .refresh_tokens()
        .issue(&user.id)
        .await
        .db_err("Failed to issue refresh token")?;

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            user: UserResponse::from(user),
            token,
            refresh_token: refresh.token,
        }),
    ))
}
