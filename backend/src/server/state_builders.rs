//! Builders wiring adapters into services and HTTP state.

use std::sync::Arc;
use std::time::Duration;

use mockable::Clock;
use tracing::info;

use todo_backend::domain::ports::{
    TodoCache, TodoCacheError, TodoRepository, TokenError, UserRepository,
};
use todo_backend::domain::{AuthService, AuthServicePorts, TodoCommandService, TodoQueryService};
use todo_backend::inbound::http::state::{HttpState, HttpStatePorts};
use todo_backend::outbound::cache::{InMemoryTodoCache, RedisTodoCache};
use todo_backend::outbound::persistence::{DbPool, DieselTodoRepository, DieselUserRepository};
use todo_backend::outbound::security::{Argon2PasswordHasher, JwtTokenCodec};

/// Driven ports behind the HTTP state.
pub(crate) struct StorePorts {
    pub(crate) todos: Arc<dyn TodoRepository>,
    pub(crate) users: Arc<dyn UserRepository>,
    pub(crate) cache: Arc<dyn TodoCache>,
}

impl StorePorts {
    /// PostgreSQL repositories sharing `pool`.
    pub(crate) fn from_pool(pool: &DbPool, cache: Arc<dyn TodoCache>) -> Self {
        Self {
            todos: Arc::new(DieselTodoRepository::new(pool.clone())),
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            cache,
        }
    }
}

/// Service tuning supplied by configuration.
pub(crate) struct ServiceSettings<'a> {
    pub(crate) cache_ttl: Duration,
    pub(crate) jwt_secret: &'a [u8],
    pub(crate) clock: Arc<dyn Clock>,
}

/// Connect to Redis when a URL is configured, otherwise use the in-process
/// cache.
pub(crate) async fn build_cache(
    redis_url: Option<&str>,
) -> Result<Arc<dyn TodoCache>, TodoCacheError> {
    match redis_url {
        Some(url) => {
            let cache = RedisTodoCache::connect(url).await?;
            info!("using Redis read cache");
            Ok(Arc::new(cache))
        }
        None => {
            info!("redis_url not set; using in-process read cache");
            Ok(Arc::new(InMemoryTodoCache::new()))
        }
    }
}

/// Build the domain services and bundle them for the handlers.
pub(crate) fn build_http_state(
    ports: StorePorts,
    settings: ServiceSettings<'_>,
) -> Result<HttpState, TokenError> {
    let StorePorts {
        todos,
        users,
        cache,
    } = ports;
    let ServiceSettings {
        cache_ttl,
        jwt_secret,
        clock,
    } = settings;

    let auth = Arc::new(AuthService::new(
        AuthServicePorts {
            users,
            hasher: Arc::new(Argon2PasswordHasher::new()),
            tokens: Arc::new(JwtTokenCodec::new(jwt_secret)?),
        },
        clock,
    ));

    Ok(HttpState::new(HttpStatePorts {
        todos: Arc::new(TodoQueryService::with_ttl(
            Arc::clone(&todos),
            cache,
            cache_ttl,
        )),
        todo_commands: Arc::new(TodoCommandService::new(todos)),
        login: auth.clone(),
        registration: auth,
    }))
}

#[cfg(test)]
mod tests {
    //! Wiring coverage using in-memory adapters.

    use super::*;
    use chrono::Utc;
    use todo_backend::domain::ports::TodoCacheKey;
    use todo_backend::domain::{LoginCredentials, TodoId};
    use todo_backend::test_support::{
        InMemoryTodoRepository, InMemoryUserRepository, MutableClock,
    };

    fn ports() -> StorePorts {
        StorePorts {
            todos: Arc::new(InMemoryTodoRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
            cache: Arc::new(InMemoryTodoCache::new()),
        }
    }

    #[tokio::test]
    async fn absent_redis_url_selects_in_process_cache() {
        let cache = build_cache(None).await.expect("in-process cache");
        let key = TodoCacheKey::item(TodoId::new(1).expect("valid id"));
        assert!(cache.get(&key).await.expect("get").is_none());
    }

    #[tokio::test]
    async fn built_state_issues_verifiable_tokens() {
        let state = build_http_state(
            ports(),
            ServiceSettings {
                cache_ttl: Duration::from_secs(60),
                jwt_secret: b"wiring-secret",
                clock: Arc::new(MutableClock::new(Utc::now())),
            },
        )
        .expect("state builds");
        let credentials =
            LoginCredentials::try_from_parts("alice", "pa55word").expect("valid credentials");

        state
            .registration
            .register(&credentials)
            .await
            .expect("registration succeeds");
        let token = state.login.login(&credentials).await.expect("login succeeds");
        let claims = state.login.verify_token(&token.token).expect("token verifies");
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn empty_secret_is_rejected() {
        let result = build_http_state(
            ports(),
            ServiceSettings {
                cache_ttl: Duration::from_secs(60),
                jwt_secret: b"",
                clock: Arc::new(MutableClock::new(Utc::now())),
            },
        );
        assert!(result.is_err());
    }
}
