//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{StoredUser, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The username is already registered.
        DuplicateUsername { username: String } => "username already registered: {username}",
    }
}

/// Store of registered users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Look a user up by exact username.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredUser>, UserPersistenceError>;

    /// Insert a user and return the store-assigned id.
    async fn insert(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<UserId, UserPersistenceError>;
}
