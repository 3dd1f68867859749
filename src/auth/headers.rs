//! Authorization header parsing.
//!
//! Pure string extraction, no validation of token shape at this layer.
//! Formats: `Authorization: Bearer <token>` and `Authorization: ApiKey <key>`.

use axum::http::{HeaderMap, header};
use thiserror::Error;

/// No usable Authorization header on the request.
#[derive(Debug, Error)]
#[error("authorization header missing")]
pub struct CredentialMissing;

/// Extract a bearer token from the `Authorization` header.
///
/// Strips a case-sensitive `Bearer` prefix and surrounding whitespace; the
/// residual string is returned verbatim.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, CredentialMissing> {
    scheme_token(headers, "Bearer")
}

/// Extract an API key from the `Authorization` header (`ApiKey` prefix).
///
/// Parsing only; checking the key against a known set is the caller's
/// concern.
pub fn api_key(headers: &HeaderMap) -> Result<&str, CredentialMissing> {
    scheme_token(headers, "ApiKey")
}

fn scheme_token<'a>(headers: &'a HeaderMap, scheme: &str) -> Result<&'a str, CredentialMissing> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(CredentialMissing)?
        .to_str()
        .map_err(|_| CredentialMissing)?
        .trim();

    if value.is_empty() {
        return Err(CredentialMissing);
    }

    Ok(value.strip_prefix(scheme).unwrap_or(value).trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_bearer_token_success() {
        let headers = headers_with_auth("Bearer abc123");
        assert_eq!(bearer_token(&headers).unwrap(), "abc123");
    }

    #[test]
    fn test_bearer_token_extra_whitespace() {
        let headers = headers_with_auth("  Bearer   abc123  ");
        assert_eq!(bearer_token(&headers).unwrap(), "abc123");
    }

    #[test]
    fn test_bearer_token_missing_header() {
        let headers = HeaderMap::new();
        assert!(bearer_token(&headers).is_err());
    }

    #[test]
    fn test_bearer_token_empty_header() {
        let headers = headers_with_auth("");
        assert!(bearer_token(&headers).is_err());
    }

    #[test]
    fn test_api_key_success() {
        let headers = headers_with_auth("ApiKey f271c81ff7084ee5b99a5091b42d486e");
        assert_eq!(api_key(&headers).unwrap(), "f271c81ff7084ee5b99a5091b42d486e");
    }

    #[test]
    fn test_api_key_without_prefix_returned_verbatim() {
        let headers = headers_with_auth("f271c81ff7084ee5b99a5091b42d486e");
        assert_eq!(api_key(&headers).unwrap(), "f271c81ff7084ee5b99a5091b42d486e");
    }
}
