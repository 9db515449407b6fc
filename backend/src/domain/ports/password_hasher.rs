//! Port for one-way password hashing.
use super::define_port_error;

define_port_error! {
    /// Errors raised while hashing or checking a password.
    pub enum PasswordHashError {
        /// Hash computation failed.
        Hashing { message: String } => "password hashing failed: {message}",
        /// Stored hash is not a parseable PHC string.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Salted, slow password hashing.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh random salt.
    fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Whether `password` matches `stored_hash`. A mismatch is `Ok(false)`.
    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordHashError>;
}
