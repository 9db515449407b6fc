//! In-memory [`UserRepository`] enforcing unique usernames.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{StoredUser, UserId};

/// Vector standing in for the `users` table.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<StoredUser>>,
}

impl InMemoryUserRepository {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredUser>, UserPersistenceError> {
        let users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(users.iter().find(|user| user.username == username).cloned())
    }

    async fn insert(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<UserId, UserPersistenceError> {
        let mut users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        if users.iter().any(|user| user.username == username) {
            return Err(UserPersistenceError::duplicate_username(username));
        }
        let next = i64::try_from(users.len())
            .map_err(|error| UserPersistenceError::query(error.to_string()))?
            + 1;
        let id = UserId::new(next);
        users.push(StoredUser {
            id,
            username: username.to_owned(),
            password_hash: password_hash.to_owned(),
        });
        Ok(id)
    }
}
