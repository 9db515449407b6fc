//! Argon2id [`PasswordHasher`] adapter producing PHC strings.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    self, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};

use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Argon2id with the crate's default parameters and a random salt per hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    /// Create a hasher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|error| PasswordHashError::hashing(error.to_string()))
    }

    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordHashError> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|error| PasswordHashError::malformed_hash(error.to_string()))?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(error) => Err(PasswordHashError::hashing(error.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_accepts_same_password() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("s3cret").expect("hash succeeds");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("s3cret", &hash).expect("verify succeeds"));
        assert!(!hasher.verify("wrong", &hash).expect("verify succeeds"));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let hasher = Argon2PasswordHasher::new();
        let first = hasher.hash("same").expect("hash succeeds");
        let second = hasher.hash("same").expect("hash succeeds");
        assert_ne!(first, second);
    }

    #[test]
    fn malformed_stored_hash_is_reported() {
        let error = Argon2PasswordHasher::new()
            .verify("s3cret", "plaintext")
            .expect_err("not a PHC string");
        assert!(matches!(error, PasswordHashError::MalformedHash { .. }));
    }
}
