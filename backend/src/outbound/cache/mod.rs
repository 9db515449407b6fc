//! Read-through cache adapters for the [`TodoCache`] port.
//!
//! [`RedisTodoCache`] is used when a Redis URL is configured;
//! [`InMemoryTodoCache`] otherwise.
//!
//! [`TodoCache`]: crate::domain::ports::TodoCache

mod in_memory_todo_cache;
mod redis_todo_cache;

pub use in_memory_todo_cache::InMemoryTodoCache;
pub use redis_todo_cache::RedisTodoCache;
