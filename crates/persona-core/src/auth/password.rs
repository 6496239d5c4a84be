//! Password hashing with bcrypt.

use crate::error::{CoreError, CoreResult};

/// Hash a plaintext password for storage.
pub fn hash_password(password: &str) -> CoreResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| CoreError::PasswordHash(e.to_string()))
}

/// Check a plaintext password against a stored hash.
///
/// A malformed hash counts as a mismatch rather than an error; login code
/// never distinguishes the two.
pub fn verify_password(password: &str, hashed: &str) -> bool {
    bcrypt::verify(password, hashed).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        // Cost 4 keeps the test fast; production uses DEFAULT_COST.
        let hash = bcrypt::hash("s3cret", 4).unwrap();
        assert!(verify_password("s3cret", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn test_malformed_hash_is_a_mismatch() {
        assert!(!verify_password("s3cret", "not-a-bcrypt-hash"));
        assert!(!verify_password("s3cret", ""));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = bcrypt::hash("s3cret", 4).unwrap();
        let b = bcrypt::hash("s3cret", 4).unwrap();
        assert_ne!(a, b);
    }
}
