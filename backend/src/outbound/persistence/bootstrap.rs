//! Idempotent schema bootstrap run at startup.
//!
//! Creates the tables when absent. This is not a migration system: existing
//! tables are left untouched.

use diesel_async::SimpleAsyncConnection;
use tracing::info;

use super::diesel_helpers::map_pool_error_message;
use super::pool::DbPool;

const CREATE_TABLES_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS todolist (
    id BIGSERIAL PRIMARY KEY,
    title VARCHAR(100) NOT NULL,
    description TEXT NOT NULL,
    status VARCHAR(16) NOT NULL CHECK (status IN ('pending', 'completed')),
    due_date DATE NULL
);
CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    username VARCHAR(50) NOT NULL UNIQUE,
    password TEXT NOT NULL
);
"#;

/// Errors raised while creating the schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaBootstrapError {
    /// No connection could be checked out.
    #[error("schema bootstrap could not connect: {message}")]
    Connection {
        /// Underlying failure.
        message: String,
    },
    /// The DDL batch failed.
    #[error("schema bootstrap failed: {message}")]
    Statement {
        /// Underlying failure.
        message: String,
    },
}

/// Create the `todolist` and `users` tables if they do not exist.
///
/// # Errors
///
/// Returns [`SchemaBootstrapError`] when the pool or the DDL batch fails.
pub async fn ensure_schema(pool: &DbPool) -> Result<(), SchemaBootstrapError> {
    let mut conn = pool
        .get()
        .await
        .map_err(|error| SchemaBootstrapError::Connection {
            message: map_pool_error_message(error),
        })?;
    conn.batch_execute(CREATE_TABLES_SQL)
        .await
        .map_err(|error| SchemaBootstrapError::Statement {
            message: error.to_string(),
        })?;
    info!("database schema ready");
    Ok(())
}
