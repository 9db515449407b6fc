//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories are thin: they translate between internal row structs
//! (`models.rs`, `schema.rs`) and domain types, and map Diesel and pool
//! failures onto the port error enums. Connections come from a `bb8` pool via
//! `diesel-async`.
//!
//! # Example
//!
//! ```no_run
//! use todo_backend::outbound::persistence::{DbPool, DieselTodoRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/todo")).await?;
//! let repo = DieselTodoRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod bootstrap;
mod diesel_helpers;
mod diesel_todo_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use bootstrap::{SchemaBootstrapError, ensure_schema};
pub use diesel_todo_repository::DieselTodoRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
