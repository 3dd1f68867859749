//! Post API endpoints.
//!
//! - POST `/posts` - Create a post (access token required)
//! - GET `/posts` - List all posts
//! - GET `/posts/{id}` - Get one post
//! - DELETE `/posts/{id}` - Delete own post (owner only)

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    routing::post,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::error::{ApiError, ResultExt, validate_uuid};
use crate::auth::{Auth, require_owner};
use crate::db::{Database, Post};
use crate::impl_has_auth_state;
use crate::jwt::JwtConfig;

/// Maximum post body length in characters.
const MAX_POST_LENGTH: usize = 140;

#[derive(Clone)]
pub struct PostsState {
    pub db: Database,
    pub jwt: Arc<JwtConfig>,
}

impl_has_auth_state!(PostsState);

pub fn router(state: PostsState) -> Router {
    Router::new()
        .route("/posts", post(create_post).get(list_posts))
        .route("/posts/{id}", get(get_post).delete(delete_post))
        .with_state(state)
}

#[derive(Deserialize)]
struct CreatePostRequest {
    body: String,
}

#[derive(Serialize)]
struct PostResponse {
    id: String,
    user_id: String,
    body: String,
    created_at: String,
    updated_at: String,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            user_id: post.user_id,
            body: post.body,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Create a new post owned by the authenticated user.
async fn create_post(
    State(state): State<PostsState>,
    Auth(user_id): Auth,
    Json(req): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.body.is_empty() {
        return Err(ApiError::bad_request("Post cannot be empty"));
    }
    if req.body.chars().count() > MAX_POST_LENGTH {
        return Err(ApiError::bad_request("Post is too long"));
    }

    let id = Uuid::new_v4().to_string();
    let created = state
        .db
        .posts()
        .create(&id, &user_id.to_string(), &req.body)
        .await
        .db_err("Failed to create post")?;

    Ok((StatusCode::CREATED, Json(PostResponse::from(created))))
}

/// List all posts.
async fn list_posts(State(state): State<PostsState>) -> Result<impl IntoResponse, ApiError> {
    let posts = state.db.posts().list_all().await.db_err("Failed to list posts")?;
    let posts: Vec<PostResponse> = posts.into_iter().map(PostResponse::from).collect();
    Ok((StatusCode::OK, Json(posts)))
}

/// Get one post by id.
async fn get_post(
    State(state): State<PostsState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    validate_uuid(&id)?;

    let found = state
        .db
        .posts()
        .get_by_id(&id)
        .await
        .db_err("Failed to get post")?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    Ok((StatusCode::OK, Json(PostResponse::from(found))))
}

/// Delete a post. The authenticated user must own it: a mismatch is 403,
/// not 401, since the caller already proved who they are.
async fn delete_post(
    State(state): State<PostsState>,
    Auth(user_id): Auth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    validate_uuid(&id)?;

    let found = state
        .db
        .posts()
        .get_by_id(&id)
        .await
        .db_err("Failed to get post")?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    require_owner(&found.user_id, user_id)?;

    state
        .db
        .posts()
        .delete(&id)
        .await
        .db_err("Failed to delete post")?;

    Ok(StatusCode::NO_CONTENT)
}
