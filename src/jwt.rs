//! Access token issuance and validation.
//!
//! Access tokens are short-lived (1 hour ceiling), stateless, signed JWTs.
//! Validation is a pure function of the signature and the clock; a leaked
//! access token cannot be revoked before its natural expiry. Long-lived
//! session state lives in [`crate::db::RefreshTokenStore`] instead.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;
use uuid::Uuid;

/// Issuer claim embedded in every access token.
pub const ISSUER: &str = "crier";

/// Ceiling for access token lifetime. Requested ttls are clamped to this.
pub const ACCESS_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

/// Claims carried by an access token. All fields are required; a token
/// missing any of them fails to decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Issuer, always [`ISSUER`]
    pub iss: String,
    /// Subject (user UUID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

/// Errors that can occur during access token operations.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Token could not be parsed, or its claims are not the expected shape
    #[error("malformed token")]
    Malformed,
    /// Signature does not match the signing secret
    #[error("invalid token signature")]
    SignatureInvalid,
    /// Current time is at or past the token's expiry
    #[error("token expired")]
    Expired,
    /// Subject claim is not a valid user UUID
    #[error("invalid token subject")]
    SubjectInvalid,
    /// Error encoding a new token
    #[error("failed to encode token: {0}")]
    Encoding(jsonwebtoken::errors::Error),
    /// System clock is before the Unix epoch
    #[error("system time error")]
    Clock,
}

/// Signing configuration for access tokens.
///
/// The secret is process-wide and immutable after startup. Rotating it
/// invalidates every not-yet-expired access token.
#[derive(Clone)]
pub struct JwtConfig {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtConfig {
    /// Create a new JWT configuration with the given symmetric secret.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    /// Issue a signed access token for a user.
    ///
    /// `ttl` is clamped to [`ACCESS_TOKEN_TTL`]. A zero ttl produces a token
    /// that is already expired; validation will reject it.
    pub fn issue_access_token(&self, user_id: Uuid, ttl: Duration) -> Result<String, JwtError> {
        let ttl = ttl.min(ACCESS_TOKEN_TTL);
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| JwtError::Clock)?
            .as_secs();

        let claims = AccessClaims {
            iss: ISSUER.to_string(),
            sub: user_id.to_string(),
            iat: now,
            exp: now + ttl.as_secs(),
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(JwtError::Encoding)
    }

    /// Validate an access token and return the authenticated user id.
    ///
    /// Pure and stateless: no store access, safe on the hot path of every
    /// protected request. Expiry is inclusive: the token is dead from the
    /// second its `exp` claim names.
    pub fn validate_access_token(&self, token: &str) -> Result<Uuid, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[ISSUER]);

        let token_data =
            jsonwebtoken::decode::<AccessClaims>(token, &self.decoding_key, &validation).map_err(
                |e| match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::SignatureInvalid,
                    _ => JwtError::Malformed,
                },
            )?;

        // Decoding only rejects exp < now; the exp == now boundary is
        // expired too.
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| JwtError::Clock)?
            .as_secs();
        if token_data.claims.exp <= now {
            return Err(JwtError::Expired);
        }

        Uuid::parse_str(&token_data.claims.sub).map_err(|_| JwtError::SubjectInvalid)
    }
}
