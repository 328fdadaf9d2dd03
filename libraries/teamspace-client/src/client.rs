//! reqwest-backed gateway.

use crate::auth::AuthClient;
use crate::credentials::CredentialSource;
use crate::error::{ClientError, Result};
use crate::gateway::Gateway;
use crate::projects::ProjectsClient;
use crate::types::{ApiError, AuthResponse, Credentials, GatewayConfig};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use teamspace_core::{Project, User};
use tracing::debug;

/// Gateway that talks to a Teamspace server over HTTP.
///
/// The credential source is part of construction: every request asks it for
/// the current token and attaches it as a bearer header when one exists.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use teamspace_client::{GatewayConfig, HttpGateway, StaticCredentials};
///
/// let config = GatewayConfig::new("https://teamspace.example.com");
/// let gateway = HttpGateway::new(config, Arc::new(StaticCredentials::token("t1")))?;
/// let projects = gateway.projects().await.list_all().await?;
/// ```
pub struct HttpGateway {
    http: Client,
    base_url: String,
    credentials: Arc<dyn CredentialSource>,
}

impl HttpGateway {
    /// Create a new gateway with the given configuration.
    pub fn new(config: GatewayConfig, credentials: Arc<dyn CredentialSource>) -> Result<Self> {
        let base_url = normalize_url(&config.url)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(format!("Teamspace/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    /// Get the normalized server URL.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Authentication endpoints, carrying the current token.
    pub async fn auth(&self) -> AuthClient<'_> {
        let token = self.credentials.bearer_token().await;
        AuthClient::new(&self.http, &self.base_url, token)
    }

    /// Project endpoints, carrying the current token.
    pub async fn projects(&self) -> ProjectsClient<'_> {
        let token = self.credentials.bearer_token().await;
        ProjectsClient::new(&self.http, &self.base_url, token)
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn register(&self, credentials: &Credentials) -> Result<AuthResponse> {
        self.auth().await.register(credentials).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse> {
        self.auth().await.login(credentials).await
    }

    async fn profile(&self) -> Result<User> {
        self.auth().await.profile().await
    }

    async fn logout(&self) -> Result<()> {
        self.auth().await.logout().await
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        self.projects().await.list_all().await
    }

    async fn create_project(&self, name: &str) -> Result<Project> {
        self.projects().await.create(name).await
    }
}

/// Validate a base URL and strip trailing slashes.
fn normalize_url(raw: &str) -> Result<String> {
    if raw.trim().is_empty() {
        return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
    }

    let trimmed = raw.trim().trim_end_matches('/');
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(ClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }

    url::Url::parse(trimmed).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

    Ok(trimmed.to_string())
}

// =============================================================================
// Shared request/response helpers
// =============================================================================

/// Attach the bearer token, if any.
pub(crate) fn authorize(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// Send a request, separating "could not connect" from other failures.
pub(crate) async fn send(request: RequestBuilder) -> Result<Response> {
    request.send().await.map_err(|e| {
        if e.is_connect() || e.is_timeout() {
            ClientError::ServerUnreachable(e.to_string())
        } else {
            ClientError::Request(e)
        }
    })
}

/// Decode a successful response body, or turn a failed one into an error.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }

    let body = response.text().await?;
    serde_json::from_str(&body)
        .map_err(|e| ClientError::Parse(format!("Failed to parse {} response: {}", what, e)))
}

/// Classify a non-2xx response.
pub(crate) async fn error_from_response(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let reason = serde_json::from_str::<ApiError>(&body)
        .ok()
        .and_then(|api_error| api_error.reason());

    debug!(status, body = %body, "Request failed");

    match (status, reason) {
        (401 | 403, reason) => ClientError::Unauthorized {
            status,
            message: reason.unwrap_or_else(|| fallback_message(&body, "Unauthorized")),
        },
        (_, Some(message)) => ClientError::Rejected { status, message },
        (_, None) => ClientError::Server {
            status,
            message: fallback_message(&body, "Request failed"),
        },
    }
}

fn fallback_message(body: &str, default: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        default.to_string()
    } else {
        body.to_string()
    }
}
