//! Refresh token storage.
//!
//! Refresh tokens are opaque 256-bit random values, hex-rendered, persisted
//! per session. A user may hold several concurrently valid tokens
//! (multi-device). State machine: Created -> Active -> Expired | Revoked;
//! "Active" is derived at read time as not-expired and not-revoked, nothing
//! transitions back. Expiry is checked lazily at lookup; no background
//! sweeps, and rows are never deleted here.

use rand::RngCore;
use sqlx::sqlite::SqlitePool;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Refresh token lifetime: 60 days.
pub const REFRESH_TOKEN_TTL_SECS: i64 = 60 * 24 * 60 * 60;

#[derive(Clone)]
pub struct RefreshTokenStore {
    pool: SqlitePool,
}

/// A persisted refresh token row. Timestamps are unix seconds.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: String,
    pub created_at: i64,
    pub expires_at: i64,
    pub revoked_at: Option<i64>,
}

/// Refresh token resolution failures. All variants are reported identically
/// (401) at the HTTP boundary so callers cannot probe token state.
#[derive(Debug, Error)]
pub enum RefreshTokenError {
    #[error("refresh token not found")]
    NotFound,
    #[error("refresh token expired")]
    Expired,
    #[error("refresh token revoked")]
    Revoked,
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("system time error")]
    Clock,
}

fn now_secs() -> Result<i64, RefreshTokenError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .map_err(|_| RefreshTokenError::Clock)
}

impl RefreshTokenStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Issue a fresh refresh token for a user and persist it.
    ///
    /// 32 bytes of OS entropy, hex-rendered. Collisions are not defended
    /// against beyond the primary key constraint.
    pub async fn issue(&self, user_id: &str) -> Result<RefreshToken, RefreshTokenError> {
        let mut bytes = [0u8; 32];
        rand::rng().fill_bytes(&mut bytes);
        let token = hex::encode(bytes);

        let now = now_secs()?;
        let expires_at = now + REFRESH_TOKEN_TTL_SECS;

        sqlx::query(
            "INSERT INTO refresh_tokens (token, user_id, created_at, expires_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&token)
        .bind(user_id)
        .bind(now)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        Ok(RefreshToken {
            token,
            user_id: user_id.to_string(),
            created_at: now,
            expires_at,
            revoked_at: None,
        })
    }

    /// Resolve a refresh token to its owning user id.
    ///
    /// Expiry is checked before revocation: an expired token reports
    /// [`RefreshTokenError::Expired`] regardless of its revoked state.
    pub async fn resolve_user(&self, token: &str) -> Result<String, RefreshTokenError> {
        let row: Option<RefreshToken> = sqlx::query_as(
            "SELECT token, user_id, created_at, expires_at, revoked_at
             FROM refresh_tokens WHERE token = ?",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        let row = row.ok_or(RefreshTokenError::NotFound)?;

        if row.expires_at <= now_secs()? {
            return Err(RefreshTokenError::Expired);
        }
        if row.revoked_at.is_some() {
            return Err(RefreshTokenError::Revoked);
        }

        Ok(row.user_id)
    }

    /// Revoke a refresh token.
    ///
    /// Idempotent: revoking an already-revoked token is a no-op success.
    /// Fails with [`RefreshTokenError::NotFound`] when no row matches.
    pub async fn revoke(&self, token: &str) -> Result<(), RefreshTokenError> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET revoked_at = ? WHERE token = ? AND revoked_at IS NULL",
        )
        .bind(now_secs()?)
        .bind(token)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        // Nothing updated: either the token was already revoked (fine) or it
        // does not exist at all.
        let exists: Option<(i64,)> =
            sqlx::query_as("SELECT 1 FROM refresh_tokens WHERE token = ?")
                .bind(token)
                .fetch_optional(&self.pool)
                .await?;

        match exists {
            Some(_) => Ok(()),
            None => Err(RefreshTokenError::NotFound),
        }
    }
}
