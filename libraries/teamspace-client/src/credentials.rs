//! Credential sources for outgoing requests.

use async_trait::async_trait;
use std::sync::Arc;

/// Supplies the bearer token attached to each request.
///
/// The gateway asks on every request, so a token stored after login is
/// picked up without rebuilding the client.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// Current token, or `None` to send the request unauthenticated.
    async fn bearer_token(&self) -> Option<String>;
}

#[async_trait]
impl<T: CredentialSource + ?Sized> CredentialSource for Arc<T> {
    async fn bearer_token(&self) -> Option<String> {
        (**self).bearer_token().await
    }
}

/// Fixed credential, mostly for tests and one-off scripts.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials(Option<String>);

impl StaticCredentials {
    pub fn none() -> Self {
        Self(None)
    }

    pub fn token(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }
}

#[async_trait]
impl CredentialSource for StaticCredentials {
    async fn bearer_token(&self) -> Option<String> {
        self.0.clone()
    }
}
