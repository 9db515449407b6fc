//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` so they depend only on
//! driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, TodoCommand, TodoQuery, UserRegistration};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Cached to-do reads.
    pub todos: Arc<dyn TodoQuery>,
    /// To-do writes.
    pub todo_commands: Arc<dyn TodoCommand>,
    /// Login and bearer-token verification.
    pub login: Arc<dyn LoginService>,
    /// Account creation.
    pub registration: Arc<dyn UserRegistration>,
}

/// Parameter object for [`HttpState::new`].
pub struct HttpStatePorts {
    /// Cached to-do reads.
    pub todos: Arc<dyn TodoQuery>,
    /// To-do writes.
    pub todo_commands: Arc<dyn TodoCommand>,
    /// Login and bearer-token verification.
    pub login: Arc<dyn LoginService>,
    /// Account creation.
    pub registration: Arc<dyn UserRegistration>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    #[must_use]
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            todos,
            todo_commands,
            login,
            registration,
        } = ports;
        Self {
            todos,
            todo_commands,
            login,
            registration,
        }
    }
}
