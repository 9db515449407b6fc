//! Authentication primitives: credentials, user identity, and token claims.
//!
//! Inbound adapters build these from raw strings before calling a driving
//! port, so services only ever see validated values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use super::Error;

/// Longest accepted username, in characters.
pub const USERNAME_MAX_CHARS: usize = 50;

/// Validation failures for credential payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialsValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Username exceeds [`USERNAME_MAX_CHARS`].
    #[error("username must be at most {max} characters")]
    UsernameTooLong {
        /// Maximum permitted length.
        max: usize,
    },
    /// Password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

impl CredentialsValidationError {
    fn field(&self) -> &'static str {
        match self {
            Self::EmptyUsername | Self::UsernameTooLong { .. } => "username",
            Self::EmptyPassword => "password",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::EmptyUsername | Self::EmptyPassword => "required",
            Self::UsernameTooLong { .. } => "too_long",
        }
    }
}

impl From<CredentialsValidationError> for Error {
    fn from(value: CredentialsValidationError) -> Self {
        Self::invalid_request(value.to_string()).with_details(json!({
            "field": value.field(),
            "code": value.code(),
        }))
    }
}

/// Validated username/password pair used for login and registration.
///
/// ## Invariants
/// - `username` is trimmed, non-empty, and at most [`USERNAME_MAX_CHARS`].
/// - `password` is non-empty and keeps caller-provided whitespace. It is
///   zeroed when the credentials are dropped.
///
/// # Examples
/// ```
/// use todo_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" alice ", "hunter22").expect("valid");
/// assert_eq!(creds.username(), "alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw username and password inputs.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialsValidationError`] when either part is unusable.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(CredentialsValidationError::EmptyUsername);
        }
        if normalized.chars().count() > USERNAME_MAX_CHARS {
            return Err(CredentialsValidationError::UsernameTooLong {
                max: USERNAME_MAX_CHARS,
            });
        }
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username suitable for lookups.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Plaintext password supplied by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Store-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stored user record as seen by the authentication service.
///
/// `password_hash` is a PHC-format string and never leaves the domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Unique username.
    pub username: String,
    /// Password hash in PHC string format.
    pub password_hash: String,
}

/// Public view of a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RegisteredUser {
    /// Store-assigned identifier.
    #[schema(value_type = i64, example = 1)]
    pub id: UserId,
    /// Registered username.
    #[schema(example = "alice")]
    pub username: String,
}

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Authenticated user.
    pub user_id: UserId,
    /// Username at issuance time.
    pub username: String,
    /// Issuance instant.
    pub issued_at: DateTime<Utc>,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
}

/// Signed access token returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AccessToken {
    /// Encoded bearer token.
    #[schema(example = "eyJhbGciOiJIUzI1NiJ9...")]
    pub token: String,
}
