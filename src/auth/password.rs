//! Credential hashing built on Argon2id.
//!
//! Stored credentials are PHC-format strings carrying their own salt and
//! parameters, so verification needs no extra configuration.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("credential hashing failed")]
pub struct PasswordError;

/// Hash a secret with a fresh random salt.
pub fn hash(secret: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| PasswordError)
}

/// Verify a secret against a stored PHC hash.
///
/// Returns false for both a mismatch and an unparseable stored hash; the
/// caller never learns which, and neither does the client.
pub fn verify(secret: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        tracing::warn!("stored credential hash is not valid PHC format");
        return false;
    };

    Argon2::default()
        .verify_password(secret.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let hashed = hash("correct horse battery").unwrap();

        assert!(hashed.starts_with("$argon2id$"));
        assert!(verify("correct horse battery", &hashed));
        assert!(!verify("wrong horse", &hashed));
    }

    #[test]
    fn same_secret_hashes_differently() {
        let a = hash("repeatable").unwrap();
        let b = hash("repeatable").unwrap();

        // Fresh salt per hash
        assert_ne!(a, b);
        assert!(verify("repeatable", &a));
        assert!(verify("repeatable", &b));
    }

    #[test]
    fn malformed_stored_hash_fails_closed() {
        assert!(!verify("anything", "not-a-phc-string"));
    }
}
