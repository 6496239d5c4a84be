//! Signed, time-boxed bearer credentials.
//!
//! There is no refresh flow: once a token expires the client must log in
//! again.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Token payload: subject email and expiry timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
}

/// Mint an HS256 token for the given subject.
pub fn create_access_token(email: &str, secret: &str, ttl_minutes: i64) -> CoreResult<String> {
    let exp = (Utc::now() + Duration::minutes(ttl_minutes)).timestamp();
    let claims = Claims {
        sub: email.to_string(),
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| CoreError::Token(e.to_string()))
}

/// Verify a token and return its subject email.
///
/// Any failure (bad signature, expired, malformed) yields `None`; callers
/// in optional-auth paths treat that as an anonymous caller. Expiry is
/// checked with zero leeway so an expired token is invalid immediately,
/// regardless of how valid its signature is.
pub fn verify_token(token: &str, secret: &str) -> Option<String> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .ok()
    .map(|data| data.claims.sub)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_token_roundtrip() {
        let token = create_access_token("ada@example.com", SECRET, 30).unwrap();
        let subject = verify_token(&token, SECRET);
        assert_eq!(subject.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn test_expired_token_is_invalid_despite_valid_signature() {
        // Signed with the right key, but expired two hours ago.
        let token = create_access_token("ada@example.com", SECRET, -120).unwrap();
        assert_eq!(verify_token(&token, SECRET), None);
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = create_access_token("ada@example.com", SECRET, 30).unwrap();
        assert_eq!(verify_token(&token, "other-secret"), None);
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        assert_eq!(verify_token("not-a-token", SECRET), None);
        assert_eq!(verify_token("", SECRET), None);
    }
}
