//! Workspace wiring
//!
//! Builds every controller around one session store, one gateway, and one
//! event bus, and owns the flows that span more than one of them.

use crate::config::{ClientConfig, SessionSettings};
use crate::dialog::CreationDialog;
use crate::directory::ProjectDirectory;
use crate::error::{Result, WorkspaceError};
use crate::events::{EventBus, WorkspaceEvent};
use crate::lifecycle::SessionLifecycle;
use crate::navigation::Navigator;
use crate::store::SessionStore;
use crate::token_store::{FileTokenStore, TokenStore};
use std::sync::Arc;
use teamspace_client::{CredentialSource, Gateway, HttpGateway};
use teamspace_core::{NavigationIntent, Project, ResourceId, User};
use tokio::sync::broadcast;
use tracing::debug;

pub struct Workspace {
    store: Arc<SessionStore>,
    lifecycle: Arc<SessionLifecycle>,
    directory: Arc<ProjectDirectory>,
    dialog: Arc<CreationDialog>,
    navigator: Arc<dyn Navigator>,
    events: EventBus,
}

impl Workspace {
    /// Wire the controllers around the given collaborators.
    pub fn new(
        settings: &SessionSettings,
        tokens: Arc<dyn TokenStore>,
        gateway: Arc<dyn Gateway>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let events = EventBus::new();
        let store = Arc::new(SessionStore::new(tokens.clone()));

        let lifecycle = Arc::new(SessionLifecycle::new(
            gateway.clone(),
            store.clone(),
            tokens,
            navigator.clone(),
            events.clone(),
            settings.logout_policy,
        ));
        let directory = Arc::new(ProjectDirectory::new(gateway, events.clone()));
        let dialog = Arc::new(CreationDialog::new(
            directory.clone(),
            events.clone(),
            settings.after_create,
        ));

        Self {
            store,
            lifecycle,
            directory,
            dialog,
            navigator,
            events,
        }
    }

    /// Open the file token store and an HTTP gateway from configuration.
    pub async fn connect(config: &ClientConfig, navigator: Arc<dyn Navigator>) -> Result<Self> {
        config.validate()?;

        let tokens = Arc::new(FileTokenStore::open(&config.session.token_path).await?);
        let credentials: Arc<dyn CredentialSource> = tokens.clone();
        let gateway = HttpGateway::new(config.server.clone(), credentials)?;

        debug!(url = %gateway.url(), "Workspace connected");
        Ok(Self::new(
            &config.session,
            tokens,
            Arc::new(gateway),
            navigator,
        ))
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn lifecycle(&self) -> &Arc<SessionLifecycle> {
        &self.lifecycle
    }

    pub fn directory(&self) -> &Arc<ProjectDirectory> {
        &self.directory
    }

    pub fn dialog(&self) -> &Arc<CreationDialog> {
        &self.dialog
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WorkspaceEvent> {
        self.events.subscribe()
    }

    /// Make sure the session has a confirmed user before touching projects.
    pub async fn ensure_session(&self) -> Result<User> {
        if let Some(user) = self.store.user().await {
            return Ok(user);
        }
        self.lifecycle
            .rehydrate()
            .await?
            .ok_or(WorkspaceError::NotAuthenticated)
    }

    /// Resolve the session, then load the project list.
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        self.ensure_session().await?;
        self.directory.list_all().await
    }

    /// Log out; once the session is gone, drop the cached projects too.
    ///
    /// A stored token is resolved first so a still-valid one is revoked on
    /// the server. If it cannot be resolved the session stays anonymous and
    /// logging out is a no-op.
    pub async fn logout(&self) -> Result<()> {
        if let Err(e) = self.ensure_session().await {
            debug!(error = %e, "No confirmed session to log out of");
        }
        self.lifecycle.logout().await?;
        if self.store.user().await.is_none() {
            self.directory.reset().await;
        }
        Ok(())
    }

    /// Navigate to a cached project, passing it along as navigation state.
    pub async fn open_project(&self, id: &ResourceId) -> Result<Project> {
        let project = self
            .directory
            .find(id)
            .await
            .ok_or_else(|| WorkspaceError::ProjectNotCached(id.clone()))?;

        self.navigator
            .goto(NavigationIntent::project(project.clone()));
        Ok(project)
    }
}
