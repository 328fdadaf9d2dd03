//! Project endpoints.

use crate::client::{authorize, read_json, send};
use crate::error::Result;
use crate::types::{CreateProjectRequest, CreateProjectResponse, ProjectListResponse};
use reqwest::Client;
use teamspace_core::Project;
use tracing::debug;

/// Project client for a Teamspace server.
pub struct ProjectsClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    token: Option<String>,
}

impl<'a> ProjectsClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, token: Option<String>) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    /// Get every project the caller is a member of.
    pub async fn list_all(&self) -> Result<Vec<Project>> {
        let url = format!("{}/projects/all", self.base_url);
        debug!(url = %url, "Fetching projects");

        let response = send(authorize(self.http.get(&url), self.token.as_deref())).await?;
        let list: ProjectListResponse = read_json(response, "project list").await?;

        debug!(projects = list.projects.len(), "Fetched projects");
        Ok(list.projects)
    }

    /// Create a project owned by the caller.
    pub async fn create(&self, name: &str) -> Result<Project> {
        let url = format!("{}/projects/create", self.base_url);
        debug!(url = %url, name = %name, "Creating project");

        let request = CreateProjectRequest {
            name: name.to_string(),
        };

        let response = send(authorize(self.http.post(&url), self.token.as_deref()).json(&request))
            .await?;
        let created: CreateProjectResponse = read_json(response, "create project").await?;
        let project = created.into_project();

        debug!(project_id = %project.id, "Project created");
        Ok(project)
    }
}
