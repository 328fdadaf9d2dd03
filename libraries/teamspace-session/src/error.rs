use teamspace_client::ClientError;
use teamspace_core::ResourceId;
use thiserror::Error;

/// Errors from the durable token store
#[derive(Error, Debug)]
pub enum TokenStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Token file is corrupt: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors surfaced by the session layer
#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error(transparent)]
    Gateway(#[from] ClientError),

    #[error("Token store error: {0}")]
    TokenStore(#[from] TokenStoreError),

    #[error("Project name is required")]
    EmptyProjectName,

    #[error("Creation dialog is not open")]
    DialogNotOpen,

    #[error("A project is already being created")]
    SubmitInProgress,

    #[error("Authentication already in progress")]
    AuthenticationInProgress,

    #[error("Already authenticated")]
    AlreadyAuthenticated,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Project not loaded: {0}")]
    ProjectNotCached(ResourceId),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl WorkspaceError {
    /// Text suitable for showing to the user
    ///
    /// Transport failures collapse into one generic message; rejections
    /// carry whatever reason the server gave.
    pub fn user_message(&self) -> String {
        match self {
            WorkspaceError::Gateway(e) if e.is_transport() => {
                "Could not reach the server. Please try again.".to_string()
            }
            WorkspaceError::Gateway(ClientError::Unauthorized { message, .. }) => {
                format!("Not authorized: {}", message)
            }
            WorkspaceError::Gateway(ClientError::Rejected { message, .. }) => message.clone(),
            WorkspaceError::Gateway(ClientError::Parse(_)) => {
                "The server sent an unexpected response.".to_string()
            }
            WorkspaceError::TokenStore(_) => "Could not save your login on this device.".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WorkspaceError>;
