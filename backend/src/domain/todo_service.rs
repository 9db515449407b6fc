//! To-do domain services.
//!
//! [`TodoQueryService`] serves reads through the cache: a hit is decoded and
//! returned without touching the store; a miss (or any cache failure) reads
//! the store and writes the result back with a fixed TTL. Cache problems are
//! logged and never reach the caller.
//!
//! [`TodoCommandService`] validates and writes straight to the store. It does
//! not invalidate cached reads, so a cached item or page may stay stale until
//! its TTL lapses.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pagination::PageRequest;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    TodoCache, TodoCacheKey, TodoCommand, TodoPersistenceError, TodoQuery, TodoRepository,
};
use crate::domain::{Error, PaginatedTodos, TodoId, TodoInput, TodoItem};

/// Expiry applied to every cached read result.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

fn map_repository_error(error: TodoPersistenceError) -> Error {
    match error {
        TodoPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("todo repository unavailable: {message}"))
        }
        TodoPersistenceError::Query { message } => {
            Error::internal(format!("todo repository error: {message}"))
        }
    }
}

/// Read-through cached queries over the to-do store.
pub struct TodoQueryService<R: ?Sized, C: ?Sized> {
    todo_repo: Arc<R>,
    cache: Arc<C>,
    ttl: Duration,
}

impl<R: ?Sized, C: ?Sized> Clone for TodoQueryService<R, C> {
    fn clone(&self) -> Self {
        Self {
            todo_repo: Arc::clone(&self.todo_repo),
            cache: Arc::clone(&self.cache),
            ttl: self.ttl,
        }
    }
}

impl<R, C> TodoQueryService<R, C>
where
    R: TodoRepository + ?Sized,
    C: TodoCache + ?Sized,
{
    /// Create a query service caching results for [`DEFAULT_CACHE_TTL`].
    pub fn new(todo_repo: Arc<R>, cache: Arc<C>) -> Self {
        Self::with_ttl(todo_repo, cache, DEFAULT_CACHE_TTL)
    }

    /// Create a query service with an explicit cache TTL.
    pub fn with_ttl(todo_repo: Arc<R>, cache: Arc<C>, ttl: Duration) -> Self {
        Self {
            todo_repo,
            cache,
            ttl,
        }
    }

    async fn read_cached<T: DeserializeOwned>(&self, key: &TodoCacheKey) -> Option<T> {
        match self.cache.get(key).await {
            Ok(Some(payload)) => match serde_json::from_str(&payload) {
                Ok(value) => {
                    debug!(cache_key = %key, "cache hit");
                    Some(value)
                }
                Err(error) => {
                    warn!(cache_key = %key, %error, "discarding undecodable cache entry");
                    None
                }
            },
            Ok(None) => {
                debug!(cache_key = %key, "cache miss");
                None
            }
            Err(error) => {
                warn!(cache_key = %key, %error, "cache read failed; falling back to store");
                None
            }
        }
    }

    async fn write_cached<T: Serialize + Sync>(&self, key: &TodoCacheKey, value: &T) {
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(error) => {
                warn!(cache_key = %key, %error, "failed to serialise cache entry");
                return;
            }
        };
        if let Err(error) = self.cache.set(key, &payload, self.ttl).await {
            warn!(cache_key = %key, %error, "cache write failed");
        }
    }
}

#[async_trait]
impl<R, C> TodoQuery for TodoQueryService<R, C>
where
    R: TodoRepository + ?Sized,
    C: TodoCache + ?Sized,
{
    async fn list_todos(&self, request: PageRequest) -> Result<PaginatedTodos, Error> {
        let key = TodoCacheKey::list(request);
        if let Some(cached) = self.read_cached::<PaginatedTodos>(&key).await {
            return Ok(cached);
        }

        let page = self
            .todo_repo
            .list_window(request.window())
            .await
            .map_err(map_repository_error)?;
        let result = PaginatedTodos::from_page(request, page);
        self.write_cached(&key, &result).await;
        Ok(result)
    }

    async fn get_todo(&self, id: TodoId) -> Result<Option<TodoItem>, Error> {
        let key = TodoCacheKey::item(id);
        if let Some(cached) = self.read_cached::<TodoItem>(&key).await {
            return Ok(Some(cached));
        }

        let Some(item) = self
            .todo_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
        else {
            return Ok(None);
        };
        self.write_cached(&key, &item).await;
        Ok(Some(item))
    }
}

/// Validated writes to the to-do store.
pub struct TodoCommandService<R: ?Sized> {
    todo_repo: Arc<R>,
}

impl<R: ?Sized> Clone for TodoCommandService<R> {
    fn clone(&self) -> Self {
        Self {
            todo_repo: Arc::clone(&self.todo_repo),
        }
    }
}

impl<R: TodoRepository + ?Sized> TodoCommandService<R> {
    /// Create a command service over the to-do repository.
    pub fn new(todo_repo: Arc<R>) -> Self {
        Self { todo_repo }
    }
}

#[async_trait]
impl<R> TodoCommand for TodoCommandService<R>
where
    R: TodoRepository + ?Sized,
{
    async fn create_todo(&self, input: TodoInput) -> Result<TodoItem, Error> {
        let draft = input.validate()?;
        let id = self
            .todo_repo
            .insert(&draft)
            .await
            .map_err(map_repository_error)?;
        info!(todo_id = %id, "todo created");
        Ok(TodoItem::from_draft(id, draft))
    }

    async fn update_todo(&self, id: TodoId, input: TodoInput) -> Result<TodoItem, Error> {
        let draft = input.validate()?;
        self.todo_repo
            .update(id, &draft)
            .await
            .map_err(map_repository_error)?;
        info!(todo_id = %id, "todo updated");
        Ok(TodoItem::from_draft(id, draft))
    }

    async fn delete_todo(&self, id: TodoId) -> Result<(), Error> {
        self.todo_repo
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        info!(todo_id = %id, "todo deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "todo_service_tests.rs"]
mod tests;
