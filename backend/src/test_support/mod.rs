//! In-memory adapters and fixtures for unit and integration tests.
//!
//! Compiled for `cfg(test)` and behind the `test-support` feature so the
//! integration tests in `backend/tests/` can drive the real services and HTTP
//! handlers without PostgreSQL or Redis.

mod clock;
mod harness;
mod todo_repository;
mod user_repository;

pub use clock::MutableClock;
pub use harness::{TEST_JWT_SECRET, TestHarness};
pub use todo_repository::InMemoryTodoRepository;
pub use user_repository::InMemoryUserRepository;
