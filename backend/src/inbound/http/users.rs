//! Account API handlers.
//!
//! ```text
//! POST /api/v1/register {"username":"alice","password":"hunter22"}
//! POST /api/v1/login    {"username":"alice","password":"hunter22"}
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ApiResult;
use super::envelope::{ApiEnvelope, respond};
use super::state::HttpState;
use crate::domain::{AccessToken, Error, LoginCredentials, RegisteredUser};

/// Credentials body shared by login and registration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct CredentialsRequest {
    /// Account name, 1 to 50 characters after trimming.
    #[serde(default)]
    #[schema(example = "alice")]
    pub username: String,
    /// Plaintext password.
    #[serde(default)]
    #[schema(example = "hunter22")]
    pub password: String,
}

impl TryFrom<CredentialsRequest> for LoginCredentials {
    type Error = Error;

    fn try_from(value: CredentialsRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password).map_err(Error::from)
    }
}

/// Exchange credentials for a bearer token valid for 72 hours.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Token issued", body = ApiEnvelope<AccessToken>),
        (status = 400, description = "Invalid request", body = ApiEnvelope<AccessToken>),
        (status = 401, description = "Invalid password", body = ApiEnvelope<AccessToken>),
        (status = 404, description = "User not found", body = ApiEnvelope<AccessToken>)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(payload.into_inner())?;
    let token = state.login.login(&credentials).await?;
    Ok(respond(StatusCode::OK, "Login successful", Some(token)))
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created", body = ApiEnvelope<RegisteredUser>),
        (status = 400, description = "Invalid request", body = ApiEnvelope<RegisteredUser>),
        (status = 409, description = "Username taken", body = ApiEnvelope<RegisteredUser>)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(payload.into_inner())?;
    let user = state.registration.register(&credentials).await?;
    Ok(respond(
        StatusCode::CREATED,
        "User created successfully",
        Some(user),
    ))
}

#[cfg(test)]
mod tests;
