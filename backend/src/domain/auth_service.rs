//! Authentication domain service.
//!
//! Implements login, bearer-token verification, and registration over the
//! user repository, password hasher, and token codec ports.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::TimeDelta;
use mockable::Clock;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::domain::ports::{
    LoginService, PasswordHashError, PasswordHasher, TokenCodec, TokenError, UserPersistenceError,
    UserRegistration, UserRepository,
};
use crate::domain::{AccessToken, Error, LoginCredentials, RegisteredUser, TokenClaims};

/// Lifetime of an issued access token.
pub const TOKEN_TTL_HOURS: i64 = 72;

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { username } => {
            Error::conflict(format!("username {username} is already registered"))
        }
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

/// Run a hasher call on the blocking pool. Key derivation is CPU-bound and
/// must not occupy an executor thread.
async fn run_hasher<T, F>(hasher: &Arc<dyn PasswordHasher>, task: F) -> Result<T, Error>
where
    T: Send + 'static,
    F: FnOnce(&dyn PasswordHasher) -> Result<T, PasswordHashError> + Send + 'static,
{
    let hasher = Arc::clone(hasher);
    tokio::task::spawn_blocking(move || task(hasher.as_ref()))
        .await
        .map_err(|error| Error::internal(format!("password hashing task failed: {error}")))?
        .map_err(map_hash_error)
}

/// Ports required by [`AuthService`].
pub struct AuthServicePorts {
    /// User store.
    pub users: Arc<dyn UserRepository>,
    /// Password hashing.
    pub hasher: Arc<dyn PasswordHasher>,
    /// Token signing and verification.
    pub tokens: Arc<dyn TokenCodec>,
}

/// Login, token verification, and registration.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenCodec>,
    clock: Arc<dyn Clock>,
}

impl AuthService {
    /// Build the service. `clock` supplies token issuance time.
    pub fn new(ports: AuthServicePorts, clock: Arc<dyn Clock>) -> Self {
        let AuthServicePorts {
            users,
            hasher,
            tokens,
        } = ports;
        Self {
            users,
            hasher,
            tokens,
            clock,
        }
    }
}

#[async_trait]
impl LoginService for AuthService {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AccessToken, Error> {
        let user = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("User not found"))?;

        let password = Zeroizing::new(credentials.password().to_owned());
        let stored_hash = user.password_hash.clone();
        let matches = run_hasher(&self.hasher, move |hasher| {
            hasher.verify(&password, &stored_hash)
        })
        .await?;
        if !matches {
            debug!(user_id = %user.id, "password mismatch");
            return Err(Error::unauthorized("Invalid password"));
        }

        let issued_at = self.clock.utc();
        let claims = TokenClaims {
            user_id: user.id,
            username: user.username,
            issued_at,
            expires_at: issued_at + TimeDelta::hours(TOKEN_TTL_HOURS),
        };
        let token = self
            .tokens
            .encode(&claims)
            .map_err(|error| Error::internal(error.to_string()))?;
        info!(user_id = %claims.user_id, "access token issued");
        Ok(AccessToken { token })
    }

    fn verify_token(&self, token: &str) -> Result<TokenClaims, Error> {
        let claims = self.tokens.decode(token).map_err(|error| {
            debug!(%error, "bearer token rejected");
            match error {
                TokenError::Expired => Error::unauthorized("token has expired"),
                TokenError::Invalid { .. } | TokenError::Signing { .. } => {
                    Error::unauthorized("invalid token")
                }
            }
        })?;
        if claims.expires_at <= self.clock.utc() {
            return Err(Error::unauthorized("token has expired"));
        }
        Ok(claims)
    }
}

#[async_trait]
impl UserRegistration for AuthService {
    async fn register(&self, credentials: &LoginCredentials) -> Result<RegisteredUser, Error> {
        let password = Zeroizing::new(credentials.password().to_owned());
        let password_hash = run_hasher(&self.hasher, move |hasher| hasher.hash(&password)).await?;
        let id = self
            .users
            .insert(credentials.username(), &password_hash)
            .await
            .map_err(map_user_error)?;
        info!(user_id = %id, "user registered");
        Ok(RegisteredUser {
            id,
            username: credentials.username().to_owned(),
        })
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
