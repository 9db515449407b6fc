//! OpenAPI documentation.
//!
//! [`ApiDoc`] collects every HTTP path and the schemas they reference. It is
//! served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    AccessToken, Error, ErrorCode, PaginatedTodos, RegisteredUser, TodoItem, TodoStatus,
};
use crate::inbound::http::todos::TodoRequest;
use crate::inbound::http::users::CredentialsRequest;

/// Name of the bearer security scheme in the generated document.
pub const BEARER_SCHEME: &str = "BearerToken";

/// Adds the bearer-token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /api/v1/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "To-do API",
        description = "Authenticated CRUD over to-do items with cached reads."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::todos::list_todos,
        crate::inbound::http::todos::get_todo,
        crate::inbound::http::todos::create_todo,
        crate::inbound::http::todos::update_todo,
        crate::inbound::http::todos::delete_todo,
        crate::inbound::http::users::login,
        crate::inbound::http::users::register,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        TodoItem,
        TodoStatus,
        PaginatedTodos,
        TodoRequest,
        CredentialsRequest,
        AccessToken,
        RegisteredUser,
        Error,
        ErrorCode
    )),
    tags(
        (name = "todos", description = "To-do items"),
        (name = "users", description = "Registration and login"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;
