//! Project directory
//!
//! Cached list of the projects the current user belongs to. A successful
//! list response replaces the cache wholesale; the server's list is
//! authoritative and nothing is merged into it.

use crate::error::{Result, WorkspaceError};
use crate::events::{EventBus, Operation, WorkspaceEvent};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use teamspace_client::Gateway;
use teamspace_core::{Project, ResourceId};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Owner of the cached project list
pub struct ProjectDirectory {
    gateway: Arc<dyn Gateway>,
    events: EventBus,
    items: RwLock<Vec<Project>>,
    /// Bumped by `reset`; list responses started under an older epoch are dropped
    epoch: AtomicU64,
}

impl ProjectDirectory {
    pub fn new(gateway: Arc<dyn Gateway>, events: EventBus) -> Self {
        Self {
            gateway,
            events,
            items: RwLock::new(Vec::new()),
            epoch: AtomicU64::new(0),
        }
    }

    /// Fetch every project and replace the cache with the response.
    ///
    /// On failure the cache is left as it was. A response that arrives
    /// after [`reset`](Self::reset) is returned but not cached.
    pub async fn list_all(&self) -> Result<Vec<Project>> {
        let epoch = self.epoch.load(Ordering::SeqCst);

        let projects = match self.gateway.list_projects().await {
            Ok(projects) => projects,
            Err(e) => return Err(self.fail(Operation::ListProjects, e.into())),
        };

        let mut items = self.items.write().await;
        if self.epoch.load(Ordering::SeqCst) != epoch {
            debug!("Directory was reset while listing; dropping stale response");
            return Ok(projects);
        }
        *items = projects.clone();
        drop(items);

        info!(count = projects.len(), "Project directory refreshed");
        self.events.publish(WorkspaceEvent::ProjectsLoaded {
            count: projects.len(),
        });

        Ok(projects)
    }

    /// Create a project on the server.
    ///
    /// The cache is not touched; callers decide whether to append the
    /// result or re-list. A blank name never reaches the network.
    pub async fn create(&self, name: &str) -> Result<Project> {
        let name = name.trim();
        if name.is_empty() {
            return Err(self.fail(Operation::CreateProject, WorkspaceError::EmptyProjectName));
        }

        match self.gateway.create_project(name).await {
            Ok(project) => {
                info!(project_id = %project.id, name = %project.name, "Project created");
                self.events.publish(WorkspaceEvent::ProjectCreated {
                    project: project.clone(),
                });
                Ok(project)
            }
            Err(e) => Err(self.fail(Operation::CreateProject, e.into())),
        }
    }

    /// Snapshot of the cached projects
    pub async fn items(&self) -> Vec<Project> {
        self.items.read().await.clone()
    }

    pub async fn find(&self, id: &ResourceId) -> Option<Project> {
        self.items
            .read()
            .await
            .iter()
            .find(|project| &project.id == id)
            .cloned()
    }

    /// Add a project locally, pending the next full refresh
    pub async fn append(&self, project: Project) {
        self.items.write().await.push(project);
    }

    /// Empty the cache and invalidate any list still in flight
    pub async fn reset(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.items.write().await.clear();
        debug!("Project directory reset");
    }

    fn fail(&self, operation: Operation, error: WorkspaceError) -> WorkspaceError {
        warn!(operation = %operation, error = %error, "Directory operation failed");
        self.events.publish(WorkspaceEvent::OperationFailed {
            operation,
            message: error.user_message(),
        });
        error
    }
}
