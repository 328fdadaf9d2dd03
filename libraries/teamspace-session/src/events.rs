//! Workspace Events
//!
//! State changes and failures are broadcast so a front end can re-render and
//! show messages without polling the controllers.

use crate::dialog::DialogState;
use crate::lifecycle::LifecycleState;
use serde::Serialize;
use teamspace_core::{Project, User};
use tokio::sync::broadcast;

/// Capacity of the broadcast channel; slow subscribers lose the oldest events
const EVENT_CAPACITY: usize = 64;

/// Operation that produced a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Register,
    Login,
    Logout,
    Rehydrate,
    ListProjects,
    CreateProject,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::Register => "register",
            Operation::Login => "login",
            Operation::Logout => "logout",
            Operation::Rehydrate => "rehydrate",
            Operation::ListProjects => "list projects",
            Operation::CreateProject => "create project",
        };
        f.write_str(name)
    }
}

/// Events emitted by the session layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkspaceEvent {
    /// The in-memory user was set or cleared
    SessionChanged {
        /// New user, `None` after logout
        user: Option<User>,
    },

    /// The lifecycle state machine moved
    LifecycleChanged {
        /// New lifecycle state
        state: LifecycleState,
    },

    /// The project cache was replaced by a list response
    ProjectsLoaded {
        /// Number of projects now cached
        count: usize,
    },

    /// The server confirmed a new project
    ProjectCreated {
        /// The created project
        project: Project,
    },

    /// The creation dialog moved
    DialogChanged {
        /// New dialog state
        state: DialogState,
    },

    /// An operation failed; `message` is meant for the user
    OperationFailed {
        /// Failed operation
        operation: Operation,
        /// User-facing description
        message: String,
    },
}

/// Cloneable handle to the event channel
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<WorkspaceEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CAPACITY);
        Self { sender }
    }

    /// Publish an event. Having no subscribers is fine.
    pub fn publish(&self, event: WorkspaceEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WorkspaceEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
