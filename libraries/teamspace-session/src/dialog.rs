//! Creation dialog
//!
//! The "new project" form as an explicit state machine:
//!
//! ```text
//!            open            submit (name non-empty)
//!  Closed ─────────► Open ─────────────────────────► Submitting
//!    ▲                │ ▲                                │   │
//!    │     cancel     │ │         create failed          │   │
//!    ├────────────────┘ └────────────────────────────────┘   │
//!    │                       create succeeded                 │
//!    └────────────────────────────────────────────────────────┘
//! ```
//!
//! "Open and submitting" cannot be represented, and a second submit while
//! `Submitting` is rejected before any request is made.

use crate::directory::ProjectDirectory;
use crate::error::{Result, WorkspaceError};
use crate::events::{EventBus, WorkspaceEvent};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use teamspace_core::Project;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// State of the creation dialog; the string is the draft project name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "draft", rename_all = "snake_case")]
pub enum DialogState {
    #[default]
    Closed,
    Open(String),
    Submitting(String),
}

impl DialogState {
    /// Closed → Open(""). Opening an open dialog keeps its draft.
    pub fn open(&self) -> Result<DialogState> {
        match self {
            DialogState::Closed => Ok(DialogState::Open(String::new())),
            DialogState::Open(draft) => Ok(DialogState::Open(draft.clone())),
            DialogState::Submitting(_) => Err(WorkspaceError::SubmitInProgress),
        }
    }

    /// Open(_) → Open(text)
    pub fn edit(&self, text: &str) -> Result<DialogState> {
        match self {
            DialogState::Open(_) => Ok(DialogState::Open(text.to_string())),
            DialogState::Closed => Err(WorkspaceError::DialogNotOpen),
            DialogState::Submitting(_) => Err(WorkspaceError::SubmitInProgress),
        }
    }

    /// Open(_) → Closed, dropping the draft. Cancelling a closed dialog is a no-op.
    pub fn cancel(&self) -> Result<DialogState> {
        match self {
            DialogState::Open(_) | DialogState::Closed => Ok(DialogState::Closed),
            DialogState::Submitting(_) => Err(WorkspaceError::SubmitInProgress),
        }
    }

    /// Open(name) → Submitting(name) when the name is not blank
    pub fn submit(&self) -> Result<DialogState> {
        match self {
            DialogState::Open(name) if name.trim().is_empty() => {
                Err(WorkspaceError::EmptyProjectName)
            }
            DialogState::Open(name) => Ok(DialogState::Submitting(name.clone())),
            DialogState::Closed => Err(WorkspaceError::DialogNotOpen),
            DialogState::Submitting(_) => Err(WorkspaceError::SubmitInProgress),
        }
    }

    /// Outcome of the create request: Closed on success, back to Open with
    /// the same draft on failure. Any other state is left alone.
    pub fn resolve(&self, succeeded: bool) -> DialogState {
        match self {
            DialogState::Submitting(_) if succeeded => DialogState::Closed,
            DialogState::Submitting(name) => DialogState::Open(name.clone()),
            other => other.clone(),
        }
    }

    pub fn draft(&self) -> Option<&str> {
        match self {
            DialogState::Open(draft) | DialogState::Submitting(draft) => Some(draft),
            DialogState::Closed => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, DialogState::Submitting(_))
    }
}

/// What happens to the directory after a project is created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AfterCreate {
    /// Leave the list alone until the next full load
    #[default]
    Keep,
    /// Append the created project to the cached list
    Append,
    /// Re-fetch the full list
    Refresh,
}

struct DialogInner {
    state: DialogState,
    /// Bumped by `dismiss`; create results from an older generation are ignored
    generation: u64,
}

/// Controller for the "new project" dialog
pub struct CreationDialog {
    directory: Arc<ProjectDirectory>,
    events: EventBus,
    after_create: AfterCreate,
    inner: Mutex<DialogInner>,
}

impl CreationDialog {
    pub fn new(directory: Arc<ProjectDirectory>, events: EventBus, after_create: AfterCreate) -> Self {
        Self {
            directory,
            events,
            after_create,
            inner: Mutex::new(DialogInner {
                state: DialogState::Closed,
                generation: 0,
            }),
        }
    }

    pub async fn state(&self) -> DialogState {
        self.inner.lock().await.state.clone()
    }

    pub async fn open(&self) -> Result<()> {
        self.apply(DialogState::open).await
    }

    pub async fn edit(&self, text: &str) -> Result<()> {
        self.apply(|state| state.edit(text)).await
    }

    pub async fn cancel(&self) -> Result<()> {
        self.apply(DialogState::cancel).await
    }

    /// Tear the dialog down from any state.
    ///
    /// Used when the surrounding screen goes away. A create request still in
    /// flight completes on the server, but its result no longer moves the
    /// dialog.
    pub async fn dismiss(&self) {
        let mut inner = self.inner.lock().await;
        inner.generation += 1;
        if inner.state != DialogState::Closed {
            inner.state = DialogState::Closed;
            self.announce(&inner.state);
        }
    }

    /// Submit the draft.
    ///
    /// The dialog is `Submitting` before the request goes out, so a second
    /// call made while it is pending fails with `SubmitInProgress` and never
    /// reaches the network.
    pub async fn submit(&self) -> Result<Project> {
        let (name, generation) = {
            let mut inner = self.inner.lock().await;
            let next = inner.state.submit().map_err(|e| {
                debug!(error = %e, "Submit rejected");
                e
            })?;
            let name = next.draft().unwrap_or_default().to_string();
            inner.state = next;
            self.announce(&inner.state);
            (name, inner.generation)
        };

        let result = self.directory.create(&name).await;

        {
            let mut inner = self.inner.lock().await;
            if inner.generation == generation {
                inner.state = inner.state.resolve(result.is_ok());
                self.announce(&inner.state);
            } else {
                debug!("Dialog dismissed before create resolved; leaving it closed");
            }
        }

        let project = result?;
        self.run_after_create(&project).await;
        Ok(project)
    }

    async fn run_after_create(&self, project: &Project) {
        match self.after_create {
            AfterCreate::Keep => {}
            AfterCreate::Append => self.directory.append(project.clone()).await,
            AfterCreate::Refresh => {
                if let Err(e) = self.directory.list_all().await {
                    warn!(error = %e, "Refresh after create failed");
                }
            }
        }
    }

    async fn apply<F>(&self, transition: F) -> Result<()>
    where
        F: FnOnce(&DialogState) -> Result<DialogState>,
    {
        let mut inner = self.inner.lock().await;
        let next = transition(&inner.state)?;
        if next != inner.state {
            inner.state = next;
            self.announce(&inner.state);
        }
        Ok(())
    }

    fn announce(&self, state: &DialogState) {
        self.events.publish(WorkspaceEvent::DialogChanged {
            state: state.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        let state = DialogState::Closed.open().unwrap();
        assert_eq!(state, DialogState::Open(String::new()));

        let state = state.edit("Foo").unwrap();
        let state = state.submit().unwrap();
        assert_eq!(state, DialogState::Submitting("Foo".into()));

        assert_eq!(state.resolve(true), DialogState::Closed);
        assert_eq!(state.resolve(false), DialogState::Open("Foo".into()));
    }

    #[test]
    fn test_rejected_transitions() {
        let submitting = DialogState::Submitting("Foo".into());
        assert!(matches!(submitting.submit(), Err(WorkspaceError::SubmitInProgress)));
        assert!(matches!(submitting.edit("Bar"), Err(WorkspaceError::SubmitInProgress)));
        assert!(matches!(submitting.cancel(), Err(WorkspaceError::SubmitInProgress)));
        assert!(matches!(submitting.open(), Err(WorkspaceError::SubmitInProgress)));

        assert!(matches!(DialogState::Closed.submit(), Err(WorkspaceError::DialogNotOpen)));
        assert!(matches!(DialogState::Closed.edit("x"), Err(WorkspaceError::DialogNotOpen)));

        let blank = DialogState::Open("   ".into());
        assert!(matches!(blank.submit(), Err(WorkspaceError::EmptyProjectName)));
    }

    #[test]
    fn test_cancel_discards_draft() {
        let state = DialogState::Open("Draft".into()).cancel().unwrap();
        assert_eq!(state, DialogState::Closed);
        assert_eq!(state.open().unwrap(), DialogState::Open(String::new()));
    }

    #[test]
    fn test_reopen_keeps_draft() {
        let state = DialogState::Open("Draft".into());
        assert_eq!(state.open().unwrap(), DialogState::Open("Draft".into()));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(DialogState::Submitting("Foo".into())).unwrap();
        assert_eq!(json["state"], "submitting");
        assert_eq!(json["draft"], "Foo");

        let closed = serde_json::to_value(DialogState::Closed).unwrap();
        assert_eq!(closed["state"], "closed");
    }
}
