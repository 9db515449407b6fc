//! Port abstraction for to-do persistence adapters and their errors.
use async_trait::async_trait;
use pagination::RowWindow;

use crate::domain::{TodoDraft, TodoId, TodoItem, TodoPage};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by to-do repository adapters.
    pub enum TodoPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "todo repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "todo repository query failed: {message}",
    }
}

/// Authoritative store of to-do items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Rows whose rank by ascending id falls inside `window`, plus the total
    /// row count from a separate statement.
    async fn list_window(&self, window: RowWindow) -> Result<TodoPage, TodoPersistenceError>;

    /// Fetch one item; `Ok(None)` when no row has this id.
    async fn find_by_id(&self, id: TodoId) -> Result<Option<TodoItem>, TodoPersistenceError>;

    /// Insert a new row and return the store-assigned id.
    async fn insert(&self, draft: &TodoDraft) -> Result<TodoId, TodoPersistenceError>;

    /// Overwrite every field of the row with `id`. Succeeds even when no row
    /// matches.
    async fn update(&self, id: TodoId, draft: &TodoDraft) -> Result<(), TodoPersistenceError>;

    /// Delete the row with `id`. Succeeds even when no row matches.
    async fn delete(&self, id: TodoId) -> Result<(), TodoPersistenceError>;
}
