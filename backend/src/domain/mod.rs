//! Domain primitives, services, and ports.
//!
//! Purpose: define the to-do and authentication model independently of HTTP,
//! SQL, and cache wire formats. Adapters depend on this module; it depends on
//! none of them.
//!
//! Public surface:
//! - Error / `ErrorCode`: transport-agnostic failure payload.
//! - `TodoItem`, `TodoDraft`, `TodoInput`, `PaginatedTodos`: to-do model.
//! - `LoginCredentials`, `UserId`, `TokenClaims`: authentication model.
//! - `TodoQueryService`, `TodoCommandService`, `AuthService`: driving-port
//!   implementations.

pub mod auth;
pub mod auth_service;
pub mod error;
pub mod ports;
pub mod todo;
pub mod todo_service;
pub mod trace_id;

pub use self::auth::{
    AccessToken, CredentialsValidationError, LoginCredentials, RegisteredUser, StoredUser,
    TokenClaims, USERNAME_MAX_CHARS, UserId,
};
pub use self::auth_service::{AuthService, AuthServicePorts, TOKEN_TTL_HOURS};
pub use self::error::{Error, ErrorCode};
pub use self::todo::{
    PaginatedTodos, TITLE_MAX_CHARS, TITLE_MIN_CHARS, TodoDraft, TodoId, TodoInput, TodoItem,
    TodoPage, TodoStatus, TodoValidationError,
};
pub use self::todo_service::{DEFAULT_CACHE_TTL, TodoCommandService, TodoQueryService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
