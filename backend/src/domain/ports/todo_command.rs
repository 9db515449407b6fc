//! Driving port for to-do writes.
use async_trait::async_trait;

use crate::domain::{Error, TodoId, TodoInput, TodoItem};

/// Write use-cases for to-do items. Inputs are validated before any store
/// interaction; validation failures surface as `invalid_request`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoCommand: Send + Sync {
    /// Create an item and return it with its new id.
    async fn create_todo(&self, input: TodoInput) -> Result<TodoItem, Error>;

    /// Replace every field of the item with `id` and echo the new values.
    async fn update_todo(&self, id: TodoId, input: TodoInput) -> Result<TodoItem, Error>;

    /// Delete the item with `id`; deleting a missing item succeeds.
    async fn delete_todo(&self, id: TodoId) -> Result<(), Error>;
}
