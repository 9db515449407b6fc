//! Real services wired onto in-memory adapters.

use std::sync::Arc;

use actix_web::web;
use chrono::Utc;

use super::{InMemoryTodoRepository, InMemoryUserRepository, MutableClock};
use crate::domain::ports::TokenError;
use crate::domain::{AuthService, AuthServicePorts, TodoCommandService, TodoQueryService};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::cache::InMemoryTodoCache;
use crate::outbound::security::{Argon2PasswordHasher, JwtTokenCodec};

/// HMAC key used by harness-issued tokens.
pub const TEST_JWT_SECRET: &[u8] = b"todo-backend-test-secret";

/// Handles onto every adapter behind a ready-to-serve [`HttpState`].
pub struct TestHarness {
    /// State to register with `App::app_data`.
    pub state: web::Data<HttpState>,
    /// Backing to-do store.
    pub todos: Arc<InMemoryTodoRepository>,
    /// Backing user store.
    pub users: Arc<InMemoryUserRepository>,
    /// Read-through cache.
    pub cache: Arc<InMemoryTodoCache>,
    /// Clock driving token issuance and expiry.
    pub clock: Arc<MutableClock>,
}

impl TestHarness {
    /// Build the harness with the clock set to the current time.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError`] if the token codec rejects [`TEST_JWT_SECRET`].
    pub fn new() -> Result<Self, TokenError> {
        let todos = Arc::new(InMemoryTodoRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let cache = Arc::new(InMemoryTodoCache::new());
        let clock = Arc::new(MutableClock::new(Utc::now()));

        let auth = Arc::new(AuthService::new(
            AuthServicePorts {
                users: users.clone(),
                hasher: Arc::new(Argon2PasswordHasher::new()),
                tokens: Arc::new(JwtTokenCodec::new(TEST_JWT_SECRET)?),
            },
            clock.clone(),
        ));
        let state = HttpState::new(HttpStatePorts {
            todos: Arc::new(TodoQueryService::new(todos.clone(), cache.clone())),
            todo_commands: Arc::new(TodoCommandService::new(todos.clone())),
            login: auth.clone(),
            registration: auth,
        });

        Ok(Self {
            state: web::Data::new(state),
            todos,
            users,
            cache,
            clock,
        })
    }
}
