//! Port for signing and verifying access tokens.
use crate::domain::TokenClaims;

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenError {
        /// Token expiry is in the past.
        Expired => "token has expired",
        /// Token is malformed or its signature does not verify.
        Invalid { message: String } => "token is invalid: {message}",
        /// Token could not be signed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Encodes claims into a signed bearer token and back.
#[cfg_attr(test, mockall::automock)]
pub trait TokenCodec: Send + Sync {
    /// Sign `claims` into a compact token.
    fn encode(&self, claims: &TokenClaims) -> Result<String, TokenError>;

    /// Verify the signature and expiry of `token` and return its claims.
    fn decode(&self, token: &str) -> Result<TokenClaims, TokenError>;
}
