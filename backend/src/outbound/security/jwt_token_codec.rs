//! HS256 JSON Web Token adapter for the [`TokenCodec`] port.
//!
//! Tokens carry `userId`, `username`, `iat` and `exp` (seconds since the
//! epoch). Expiry is validated with zero leeway.

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenCodec, TokenError};
use crate::domain::{TokenClaims, UserId};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireClaims {
    user_id: i64,
    username: String,
    iat: i64,
    exp: i64,
}

impl From<&TokenClaims> for WireClaims {
    fn from(claims: &TokenClaims) -> Self {
        Self {
            user_id: claims.user_id.get(),
            username: claims.username.clone(),
            iat: claims.issued_at.timestamp(),
            exp: claims.expires_at.timestamp(),
        }
    }
}

impl TryFrom<WireClaims> for TokenClaims {
    type Error = TokenError;

    fn try_from(wire: WireClaims) -> Result<Self, Self::Error> {
        let timestamp = |seconds: i64, name: &str| {
            DateTime::<Utc>::from_timestamp(seconds, 0)
                .ok_or_else(|| TokenError::invalid(format!("{name} out of range")))
        };
        Ok(Self {
            user_id: UserId::new(wire.user_id),
            username: wire.username,
            issued_at: timestamp(wire.iat, "iat")?,
            expires_at: timestamp(wire.exp, "exp")?,
        })
    }
}

fn map_decode_error(error: &jsonwebtoken::errors::Error) -> TokenError {
    match error.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::invalid(error.to_string()),
    }
}

/// Symmetric HS256 signer and verifier.
#[derive(Clone)]
pub struct JwtTokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtTokenCodec {
    /// Build a codec from the shared signing secret.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Signing`] when `secret` is empty.
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::signing("signing secret must not be empty"));
        }
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat"]);
        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        })
    }
}

impl TokenCodec for JwtTokenCodec {
    fn encode(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        encode(
            &Header::new(Algorithm::HS256),
            &WireClaims::from(claims),
            &self.encoding,
        )
        .map_err(|error| TokenError::signing(error.to_string()))
    }

    fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let data = decode::<WireClaims>(token, &self.decoding, &self.validation)
            .map_err(|error| map_decode_error(&error))?;
        TokenClaims::try_from(data.claims)
    }
}
