//! Driving port for account registration.
use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, RegisteredUser};

/// Registration use-case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Hash the password and store a new user. A taken username fails with
    /// `conflict`.
    async fn register(&self, credentials: &LoginCredentials) -> Result<RegisteredUser, Error>;
}
