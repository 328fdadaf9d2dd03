/// Client configuration
use crate::dialog::AfterCreate;
use crate::error::{Result, WorkspaceError};
use crate::lifecycle::LogoutPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use teamspace_client::GatewayConfig;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClientConfig {
    #[serde(default = "default_server")]
    pub server: GatewayConfig,

    #[serde(default)]
    pub session: SessionSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionSettings {
    /// File holding the durable token
    #[serde(default = "default_token_path")]
    pub token_path: PathBuf,

    #[serde(default)]
    pub logout_policy: LogoutPolicy,

    #[serde(default)]
    pub after_create: AfterCreate,
}

fn default_server() -> GatewayConfig {
    GatewayConfig::new(default_url())
}

fn default_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_token_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("teamspace"))
        .unwrap_or_else(|| PathBuf::from(".teamspace"))
        .join("session.json")
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            session: SessionSettings::default(),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            token_path: default_token_path(),
            logout_policy: LogoutPolicy::default(),
            after_create: AfterCreate::default(),
        }
    }
}

impl ClientConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = self.server.url.trim();
        if url.is_empty() {
            return Err(WorkspaceError::Config("server.url cannot be empty".into()));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(WorkspaceError::Config(
                "server.url must start with http:// or https://".into(),
            ));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(WorkspaceError::Config(
                "server.request_timeout_secs must be greater than zero".into(),
            ));
        }
        if self.session.token_path.as_os_str().is_empty() {
            return Err(WorkspaceError::Config(
                "session.token_path cannot be empty".into(),
            ));
        }
        Ok(())
    }
}
