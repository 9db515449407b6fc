//! Driving port for login and bearer-token verification.
//!
//! Handlers and the request extractor depend on this trait only, so HTTP
//! tests can substitute a double instead of wiring hashing and signing.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, LoginCredentials, TokenClaims};

/// Authentication use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Check credentials and issue a signed access token.
    ///
    /// Unknown usernames fail with `not_found`; a wrong password fails with
    /// `unauthorized`.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AccessToken, Error>;

    /// Validate a presented token and return its claims. Missing, malformed,
    /// and expired tokens all fail with `unauthorized`.
    fn verify_token(&self, token: &str) -> Result<TokenClaims, Error>;
}
