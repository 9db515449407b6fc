//! PostgreSQL-backed user repository.
//!
//! A unique-constraint violation on insert is reported as
//! [`UserPersistenceError::DuplicateUsername`] from the database error kind,
//! not by inspecting message text.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{StoredUser, UserId};

use super::diesel_helpers::{map_basic_diesel_error, map_pool_error_message};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(map_pool_error_message(error))
}

fn map_lookup_error(error: DieselError) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        "find user",
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn map_insert_error(error: DieselError, username: &str) -> UserPersistenceError {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserPersistenceError::duplicate_username(username)
        }
        other => map_basic_diesel_error(
            other,
            "insert user",
            UserPersistenceError::query,
            UserPersistenceError::connection,
        ),
    }
}

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredUser>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_lookup_error)?;
        Ok(row.map(StoredUser::from))
    }

    async fn insert(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<UserId, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_user = NewUserRow {
            username,
            password: password_hash,
        };
        let id: i64 = diesel::insert_into(users::table)
            .values(&new_user)
            .returning(users::id)
            .get_result(&mut conn)
            .await
            .map_err(|error| map_insert_error(error, username))?;
        Ok(UserId::new(id))
    }
}

#[cfg(test)]
mod tests {
    //! Error classification coverage.
    use super::*;
    use rstest::rstest;

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new("database said no".to_owned()))
    }

    #[rstest]
    fn unique_violation_is_duplicate_username() {
        assert_eq!(
            map_insert_error(database_error(DatabaseErrorKind::UniqueViolation), "alice"),
            UserPersistenceError::duplicate_username("alice")
        );
    }

    #[rstest]
    fn closed_connection_is_connection_error() {
        assert!(matches!(
            map_insert_error(database_error(DatabaseErrorKind::ClosedConnection), "alice"),
            UserPersistenceError::Connection { .. }
        ));
    }

    #[rstest]
    #[case(DatabaseErrorKind::CheckViolation)]
    #[case(DatabaseErrorKind::NotNullViolation)]
    fn other_constraint_failures_are_query_errors(#[case] kind: DatabaseErrorKind) {
        assert!(matches!(
            map_insert_error(database_error(kind), "alice"),
            UserPersistenceError::Query { .. }
        ));
    }
}
