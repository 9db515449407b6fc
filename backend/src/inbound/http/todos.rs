//! To-do API handlers.
//!
//! ```text
//! GET    /api/v1/todos?page=&limit=
//! GET    /api/v1/todo/{id}
//! POST   /api/v1/todo
//! PUT    /api/v1/todo/{id}
//! DELETE /api/v1/todo/{id}
//! ```
//!
//! Every route requires a bearer token. Reads go through the cached query
//! service; writes go straight to the command service.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ApiResult;
use super::auth::AuthenticatedUser;
use super::envelope::{ApiEnvelope, respond};
use super::state::HttpState;
use super::validation::{PageQuery, parse_todo_id};
use crate::domain::{Error, PaginatedTodos, TodoInput, TodoItem};

/// Create/update request body. Missing text fields are treated as empty and
/// rejected by validation.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct TodoRequest {
    /// 3 to 100 characters after trimming.
    #[serde(default)]
    #[schema(example = "Buy milk")]
    pub title: String,
    /// Non-blank description.
    #[serde(default)]
    #[schema(example = "Semi-skimmed, two litres")]
    pub description: String,
    /// `pending` or `completed`.
    #[serde(default)]
    #[schema(example = "pending")]
    pub status: String,
    /// Optional `YYYY-MM-DD` date.
    #[serde(default)]
    #[schema(example = "2024-05-01")]
    pub due_date: Option<String>,
}

impl From<TodoRequest> for TodoInput {
    fn from(request: TodoRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            status: request.status,
            due_date: request.due_date,
        }
    }
}

/// List to-do items one page at a time.
#[utoipa::path(
    get,
    path = "/api/v1/todos",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of items", body = ApiEnvelope<PaginatedTodos>),
        (status = 401, description = "Missing or invalid token", body = ApiEnvelope<TodoItem>),
        (status = 503, description = "Store unavailable", body = ApiEnvelope<TodoItem>)
    ),
    tags = ["todos"],
    operation_id = "listTodos"
)]
#[get("/todos")]
pub async fn list_todos(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let page = state.todos.list_todos(query.to_page_request()).await?;
    Ok(respond(
        StatusCode::OK,
        "Todos retrieved successfully",
        Some(page),
    ))
}

/// Fetch one item by id.
#[utoipa::path(
    get,
    path = "/api/v1/todo/{id}",
    params(("id" = i64, Path, description = "To-do identifier")),
    responses(
        (status = 200, description = "Item", body = ApiEnvelope<TodoItem>),
        (status = 400, description = "Invalid id", body = ApiEnvelope<TodoItem>),
        (status = 401, description = "Missing or invalid token", body = ApiEnvelope<TodoItem>),
        (status = 404, description = "No such item", body = ApiEnvelope<TodoItem>)
    ),
    tags = ["todos"],
    operation_id = "getTodo"
)]
#[get("/todo/{id}")]
pub async fn get_todo(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_todo_id(&path)?;
    let item = state
        .todos
        .get_todo(id)
        .await?
        .ok_or_else(|| Error::not_found("Todo not found"))?;
    Ok(respond(
        StatusCode::OK,
        "Todo retrieved successfully",
        Some(item),
    ))
}

/// Create an item.
#[utoipa::path(
    post,
    path = "/api/v1/todo",
    request_body = TodoRequest,
    responses(
        (status = 201, description = "Created", body = ApiEnvelope<TodoItem>),
        (status = 400, description = "Validation failed", body = ApiEnvelope<TodoItem>),
        (status = 401, description = "Missing or invalid token", body = ApiEnvelope<TodoItem>)
    ),
    tags = ["todos"],
    operation_id = "createTodo"
)]
#[post("/todo")]
pub async fn create_todo(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<TodoRequest>,
) -> ApiResult<HttpResponse> {
    let item = state
        .todo_commands
        .create_todo(payload.into_inner().into())
        .await?;
    Ok(respond(
        StatusCode::CREATED,
        "Task created successfully",
        Some(item),
    ))
}

/// Replace every field of an item. Succeeds even when no row has the id.
#[utoipa::path(
    put,
    path = "/api/v1/todo/{id}",
    params(("id" = i64, Path, description = "To-do identifier")),
    request_body = TodoRequest,
    responses(
        (status = 200, description = "Updated", body = ApiEnvelope<TodoItem>),
        (status = 400, description = "Validation failed", body = ApiEnvelope<TodoItem>),
        (status = 401, description = "Missing or invalid token", body = ApiEnvelope<TodoItem>)
    ),
    tags = ["todos"],
    operation_id = "updateTodo"
)]
#[put("/todo/{id}")]
pub async fn update_todo(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<TodoRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_todo_id(&path)?;
    let item = state
        .todo_commands
        .update_todo(id, payload.into_inner().into())
        .await?;
    Ok(respond(
        StatusCode::OK,
        "Todo updated successfully",
        Some(item),
    ))
}

/// Delete an item. Deleting a missing id succeeds.
#[utoipa::path(
    delete,
    path = "/api/v1/todo/{id}",
    params(("id" = i64, Path, description = "To-do identifier")),
    responses(
        (status = 200, description = "Deleted; task is null", body = ApiEnvelope<TodoItem>),
        (status = 400, description = "Invalid id", body = ApiEnvelope<TodoItem>),
        (status = 401, description = "Missing or invalid token", body = ApiEnvelope<TodoItem>)
    ),
    tags = ["todos"],
    operation_id = "deleteTodo"
)]
#[delete("/todo/{id}")]
pub async fn delete_todo(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_todo_id(&path)?;
    state.todo_commands.delete_todo(id).await?;
    Ok(respond::<TodoItem>(
        StatusCode::OK,
        "Todo deleted successfully",
        None,
    ))
}

#[cfg(test)]
#[path = "todos_tests.rs"]
mod tests;
