//! Password hashing and verification.

use crate::{AuthError, AuthResult};

/// Bcrypt cost factor. Fixed for the process lifetime; raising it only
/// affects digests minted afterwards.
pub const BCRYPT_COST: u32 = 10;

/// Hashes a plaintext password.
///
/// The salt is randomized per call, so hashing the same plaintext twice
/// yields different digests.
pub fn hash_password(plaintext: &str) -> AuthResult<String> {
    bcrypt::hash(plaintext, BCRYPT_COST).map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Verifies a plaintext password against a stored digest.
///
/// A malformed digest verifies as `false` rather than erroring; the
/// comparison itself is constant-time.
pub fn verify_password(plaintext: &str, digest: &str) -> bool {
    bcrypt::verify(plaintext, digest).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let digest = hash_password("hunter2").unwrap();

        assert!(verify_password("hunter2", &digest));
        assert!(!verify_password("hunter3", &digest));
    }

    #[test]
    fn test_salt_randomized_per_call() {
        let first = hash_password("hunter2").unwrap();
        let second = hash_password("hunter2").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("hunter2", &first));
        assert!(verify_password("hunter2", &second));
    }

    #[test]
    fn test_malformed_digest_verifies_false() {
        assert!(!verify_password("hunter2", "not-a-bcrypt-digest"));
        assert!(!verify_password("hunter2", ""));
    }
}
