//! Types for Teamspace API requests and responses.

use serde::{Deserialize, Serialize};
use teamspace_core::{Project, User};

/// Configuration for connecting to a Teamspace server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the server (e.g., "https://teamspace.example.com")
    pub url: String,

    /// Whole-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl GatewayConfig {
    /// Create a new gateway config with just the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

// =============================================================================
// Authentication Types
// =============================================================================

/// Request body for the register and login endpoints.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Response from successful register or login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Response from the profile endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileResponse {
    pub user: User,
}

// =============================================================================
// Project Types
// =============================================================================

/// Response from the project listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectListResponse {
    pub projects: Vec<Project>,
}

/// Request body for project creation.
#[derive(Debug, Clone, Serialize)]
pub struct CreateProjectRequest {
    pub name: String,
}

/// Response from project creation.
///
/// Some deployments wrap the created project, others return it bare.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CreateProjectResponse {
    Wrapped { project: Project },
    Bare(Project),
}

impl CreateProjectResponse {
    pub fn into_project(self) -> Project {
        match self {
            CreateProjectResponse::Wrapped { project } | CreateProjectResponse::Bare(project) => {
                project
            }
        }
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Single entry of a validation error list.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationEntry {
    #[serde(alias = "message")]
    pub msg: String,
}

/// Structured error body returned by the server.
///
/// Handlers answer with `{"message": ...}`, `{"error": ...}`, or a
/// validator-style `{"errors": [{"msg": ...}]}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub errors: Vec<ValidationEntry>,
}

impl ApiError {
    /// Most specific human-readable reason in the body
    pub fn reason(&self) -> Option<String> {
        self.message
            .clone()
            .or_else(|| self.error.clone())
            .or_else(|| self.errors.first().map(|entry| entry.msg.clone()))
            .filter(|reason| !reason.trim().is_empty())
    }
}
