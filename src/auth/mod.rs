//! Authentication subsystem.
//!
//! Composes four pieces: Argon2id password hashing, `Authorization` header
//! parsing, stateless access token validation (see [`crate::jwt`]), and the
//! [`Auth`] extractor that protected endpoints use to resolve a user id per
//! request. Refresh token state lives in [`crate::db::RefreshTokenStore`].

mod errors;
mod extractors;
mod headers;
mod password;
mod state;

pub use errors::{AuthRejection, OwnershipViolation};
pub use extractors::{Auth, require_owner};
pub use headers::{CredentialMissing, api_key, bearer_token};
pub use password::{HashError, hash_password, verify_password};
pub use state::HasAuthState;
