//! Uniform JSON response envelope.
//!
//! Every API response, success or failure, has the shape
//! `{ "success", "message", "task", "error" }`. `success` mirrors whether the
//! status is 2xx.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;

/// Response body wrapper shared by all `/api/v1` endpoints.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use todo_backend::inbound::http::envelope::ApiEnvelope;
///
/// let body = ApiEnvelope::new(StatusCode::CREATED, "Task created successfully", Some(7_u32));
/// assert!(body.success);
/// assert_eq!(body.task, Some(7));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ApiEnvelope<T> {
    /// `true` for 2xx responses.
    pub success: bool,
    /// Human-readable outcome.
    #[schema(example = "Todo retrieved successfully")]
    pub message: String,
    /// Payload, `null` when the operation returns nothing.
    pub task: Option<T>,
    /// Failure detail, `null` on success.
    pub error: Option<Error>,
}

impl<T> ApiEnvelope<T> {
    /// Envelope for a response with `status`.
    pub fn new(status: StatusCode, message: impl Into<String>, task: Option<T>) -> Self {
        Self {
            success: status.is_success(),
            message: message.into(),
            task,
            error: None,
        }
    }

    /// Envelope describing `error`; the message repeats the error message.
    #[must_use]
    pub fn failure(error: Error) -> Self {
        Self {
            success: false,
            message: error.message().to_owned(),
            task: None,
            error: Some(error),
        }
    }
}

impl<T: Serialize> ApiEnvelope<T> {
    /// Render as a JSON response with `status`.
    #[must_use]
    pub fn into_response(self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }
}

/// Build a successful JSON response carrying `task`.
pub fn respond<T: Serialize>(
    status: StatusCode,
    message: impl Into<String>,
    task: Option<T>,
) -> HttpResponse {
    ApiEnvelope::new(status, message, task).into_response(status)
}
