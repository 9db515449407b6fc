//! Driving port for to-do reads.
//!
//! Inbound adapters call this without knowing whether a result came from the
//! cache or the store.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Error, PaginatedTodos, TodoId, TodoItem};

/// Read use-cases for to-do items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoQuery: Send + Sync {
    /// One page of items ordered by ascending id.
    async fn list_todos(&self, request: PageRequest) -> Result<PaginatedTodos, Error>;

    /// One item by id; `Ok(None)` when it does not exist.
    async fn get_todo(&self, id: TodoId) -> Result<Option<TodoItem>, Error>;
}
