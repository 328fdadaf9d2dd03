//! Authentication endpoints.

use crate::client::{authorize, error_from_response, read_json, send};
use crate::error::Result;
use crate::types::{AuthResponse, Credentials, ProfileResponse};
use reqwest::Client;
use teamspace_core::User;
use tracing::{debug, info, warn};

/// Authentication client for a Teamspace server.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    token: Option<String>,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, token: Option<String>) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    /// Create an account. Returns the new user and its token.
    pub async fn register(&self, credentials: &Credentials) -> Result<AuthResponse> {
        self.authenticate("register", credentials).await
    }

    /// Login with email and password. Returns the user and its token.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse> {
        self.authenticate("login", credentials).await
    }

    async fn authenticate(&self, action: &str, credentials: &Credentials) -> Result<AuthResponse> {
        let url = format!("{}/users/{}", self.base_url, action);
        debug!(url = %url, email = %credentials.email, "Attempting {}", action);

        let response = send(self.http.post(&url).json(credentials)).await?;

        match read_json::<AuthResponse>(response, action).await {
            Ok(auth) => {
                info!(user_id = %auth.user.id, "{} successful", action);
                Ok(auth)
            }
            Err(e) => {
                warn!(error = %e, "{} failed", action);
                Err(e)
            }
        }
    }

    /// Get the user the current token belongs to.
    pub async fn profile(&self) -> Result<User> {
        let url = format!("{}/users/profile", self.base_url);
        debug!(url = %url, "Getting current user");

        let response = send(authorize(self.http.get(&url), self.token.as_deref())).await?;
        let profile: ProfileResponse = read_json(response, "profile").await?;

        Ok(profile.user)
    }

    /// End the server-side session.
    pub async fn logout(&self) -> Result<()> {
        let url = format!("{}/logout", self.base_url);
        debug!(url = %url, "Logging out");

        let response = send(authorize(self.http.get(&url), self.token.as_deref())).await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(error_from_response(response).await)
        }
    }
}
