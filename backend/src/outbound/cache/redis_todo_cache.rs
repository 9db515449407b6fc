//! Redis-backed [`TodoCache`] adapter.
//!
//! Values are stored as plain strings with `SET key value EX ttl`. Pool
//! checkout and command failures surface as [`TodoCacheError::Backend`];
//! values that are not valid UTF-8 surface as [`TodoCacheError::Decode`].

use std::time::Duration;

use async_trait::async_trait;
use bb8_redis::RedisConnectionManager;
use bb8_redis::bb8::{Pool, RunError};
use bb8_redis::redis::{AsyncCommands, ErrorKind, RedisError};
use tracing::debug;

use crate::domain::ports::{TodoCache, TodoCacheError, TodoCacheKey};

const DEFAULT_POOL_SIZE: u32 = 8;
const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(2);

fn map_redis_error(error: &RedisError) -> TodoCacheError {
    match error.kind() {
        ErrorKind::UnexpectedReturnType => TodoCacheError::decode(error.to_string()),
        _ => TodoCacheError::backend(error.to_string()),
    }
}

fn map_run_error(error: RunError<RedisError>) -> TodoCacheError {
    match error {
        RunError::User(inner) => map_redis_error(&inner),
        RunError::TimedOut => TodoCacheError::backend("timed out waiting for a redis connection"),
    }
}

/// Redis rejects `EX 0`, so sub-second TTLs round up to one second.
fn expiry_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

/// Cache adapter over a pooled Redis connection.
#[derive(Clone)]
pub struct RedisTodoCache {
    pool: Pool<RedisConnectionManager>,
}

impl RedisTodoCache {
    /// Build a connection pool for `url` (for example `redis://localhost:6379`).
    ///
    /// # Errors
    ///
    /// Returns [`TodoCacheError::Backend`] when the URL is invalid or the
    /// initial connection cannot be established.
    pub async fn connect(url: &str) -> Result<Self, TodoCacheError> {
        let manager =
            RedisConnectionManager::new(url).map_err(|error| map_redis_error(&error))?;
        let pool = Pool::builder()
            .max_size(DEFAULT_POOL_SIZE)
            .connection_timeout(DEFAULT_CONNECTION_TIMEOUT)
            .build(manager)
            .await
            .map_err(|error| map_redis_error(&error))?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl TodoCache for RedisTodoCache {
    async fn get(&self, key: &TodoCacheKey) -> Result<Option<String>, TodoCacheError> {
        let mut conn = self.pool.get().await.map_err(map_run_error)?;
        let value: Option<String> = conn
            .get(key.as_str())
            .await
            .map_err(|error| map_redis_error(&error))?;
        debug!(key = %key, hit = value.is_some(), "redis cache lookup");
        Ok(value)
    }

    async fn set(
        &self,
        key: &TodoCacheKey,
        payload: &str,
        ttl: Duration,
    ) -> Result<(), TodoCacheError> {
        let mut conn = self.pool.get().await.map_err(map_run_error)?;
        let seconds = expiry_seconds(ttl);
        conn.set_ex::<_, _, ()>(key.as_str(), payload, seconds)
            .await
            .map_err(|error| map_redis_error(&error))?;
        debug!(key = %key, ttl_secs = seconds, "redis cache write");
        Ok(())
    }
}
