//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`TodoRepository`, `UserRepository`, `TodoCache`,
//! `PasswordHasher`, `TokenCodec`) are implemented by outbound adapters.
//! Driving ports (`TodoQuery`, `TodoCommand`, `LoginService`,
//! `UserRegistration`) are implemented by domain services and called by
//! inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod cache_key;
mod login_service;
mod password_hasher;
mod todo_cache;
mod todo_command;
mod todo_query;
mod todo_repository;
mod token_codec;
mod user_registration;
mod user_repository;

pub use cache_key::TodoCacheKey;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use todo_cache::MockTodoCache;
pub use todo_cache::{TodoCache, TodoCacheError};
#[cfg(test)]
pub use todo_command::MockTodoCommand;
pub use todo_command::TodoCommand;
#[cfg(test)]
pub use todo_query::MockTodoQuery;
pub use todo_query::TodoQuery;
#[cfg(test)]
pub use todo_repository::MockTodoRepository;
pub use todo_repository::{TodoPersistenceError, TodoRepository};
#[cfg(test)]
pub use token_codec::MockTokenCodec;
pub use token_codec::{TokenCodec, TokenError};
#[cfg(test)]
pub use user_registration::MockUserRegistration;
pub use user_registration::UserRegistration;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
