//! Axum extractors for authentication and the ownership check.

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use super::errors::{AuthRejection, OwnershipViolation};
use super::headers::bearer_token;
use super::state::HasAuthState;

/// Extractor for endpoints that require a valid access token.
///
/// Reads the bearer token from the `Authorization` header and validates it
/// against the process signing secret. No store access; the whole check is
/// in-memory. Any failure surfaces as a uniform 401.
pub struct Auth(pub Uuid);

impl<S> FromRequestParts<S> for Auth
where
    S: HasAuthState + Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).map_err(AuthRejection::log)?;
        let user_id = state
            .jwt()
            .validate_access_token(token)
            .map_err(AuthRejection::log)?;
        Ok(Auth(user_id))
    }
}

/// Require that the authenticated user owns a resource before mutating it.
///
/// `owner_id` is the resource's recorded owner as stored (uuid string).
pub fn require_owner(owner_id: &str, user_id: Uuid) -> Result<(), OwnershipViolation> {
    if owner_id == user_id.to_string() {
        Ok(())
    } else {
        Err(OwnershipViolation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_owner_match() {
        let id = Uuid::new_v4();
        assert!(require_owner(&id.to_string(), id).is_ok());
    }

    #[test]
    fn test_require_owner_mismatch() {
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        assert!(require_owner(&owner.to_string(), other).is_err());
    }
}
