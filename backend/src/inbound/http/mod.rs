//! HTTP inbound adapter exposing the REST API.
//!
//! Handlers translate requests into driving-port calls and wrap every result
//! in [`envelope::ApiEnvelope`].

pub mod auth;
pub mod envelope;
pub mod error;
pub mod health;
pub mod state;
pub mod todos;
pub mod users;
pub mod validation;

use actix_web::{Scope, web};

pub use error::ApiResult;

/// Prefix shared by all API routes.
pub const API_PREFIX: &str = "/api/v1";

/// Scope registering every `/api/v1` route with envelope-aware JSON errors.
///
/// Handlers expect [`HttpState`] to be registered on the app as `web::Data`.
///
/// [`HttpState`]: state::HttpState
#[must_use]
pub fn api_scope() -> Scope {
    web::scope(API_PREFIX)
        .app_data(validation::json_config())
        .service(todos::list_todos)
        .service(todos::get_todo)
        .service(todos::create_todo)
        .service(todos::update_todo)
        .service(todos::delete_todo)
        .service(users::login)
        .service(users::register)
}
