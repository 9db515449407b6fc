//! Port for the read-through cache holding serialised to-do read results.
use std::time::Duration;

use async_trait::async_trait;

use super::{TodoCacheKey, define_port_error};

define_port_error! {
    /// Errors surfaced by cache adapters. Callers log these and fall back to
    /// the store; they never reach clients.
    pub enum TodoCacheError {
        /// Cache backend is unavailable or timing out.
        Backend { message: String } => "todo cache backend failure: {message}",
        /// Stored bytes could not be decoded as text.
        Decode { message: String } => "todo cache payload unreadable: {message}",
    }
}

/// Key-value store with expiry for JSON payloads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoCache: Send + Sync {
    /// Read the payload stored under `key`; `Ok(None)` on a miss.
    async fn get(&self, key: &TodoCacheKey) -> Result<Option<String>, TodoCacheError>;

    /// Store `payload` under `key`, replacing any previous value, expiring
    /// after `ttl`.
    async fn set(
        &self,
        key: &TodoCacheKey,
        payload: &str,
        ttl: Duration,
    ) -> Result<(), TodoCacheError>;
}
