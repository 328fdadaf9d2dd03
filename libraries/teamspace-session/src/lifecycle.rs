//! Session lifecycle
//!
//! Drives the `Anonymous → Authenticating → Authenticated → LoggingOut`
//! state machine and keeps the in-memory user, the durable token, and the
//! navigation intent in step with each transition.

use crate::error::{Result, WorkspaceError};
use crate::events::{EventBus, Operation, WorkspaceEvent};
use crate::navigation::Navigator;
use crate::store::SessionStore;
use crate::token_store::TokenStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use teamspace_client::{Credentials, Gateway};
use teamspace_core::{NavigationIntent, User};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Anonymous,
    Authenticating,
    Authenticated,
    LoggingOut,
}

/// What to do with local state when the server logout call fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogoutPolicy {
    /// Keep the client logged in until the server acknowledges the logout
    #[default]
    RequireServerAck,
    /// Drop the local token and user even if the server call failed
    ClearLocally,
}

/// Register / login / logout / rehydrate controller
pub struct SessionLifecycle {
    gateway: Arc<dyn Gateway>,
    store: Arc<SessionStore>,
    tokens: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
    events: EventBus,
    logout_policy: LogoutPolicy,
    state: Mutex<LifecycleState>,
}

impl SessionLifecycle {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        store: Arc<SessionStore>,
        tokens: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
        events: EventBus,
        logout_policy: LogoutPolicy,
    ) -> Self {
        Self {
            gateway,
            store,
            tokens,
            navigator,
            events,
            logout_policy,
            state: Mutex::new(LifecycleState::Anonymous),
        }
    }

    pub async fn state(&self) -> LifecycleState {
        *self.state.lock().await
    }

    pub fn logout_policy(&self) -> LogoutPolicy {
        self.logout_policy
    }

    /// Create an account and sign in as it.
    pub async fn register(&self, email: &str, password: &str) -> Result<User> {
        self.authenticate(Operation::Register, Credentials::new(email, password))
            .await
    }

    /// Sign in with an existing account.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        self.authenticate(Operation::Login, Credentials::new(email, password))
            .await
    }

    async fn authenticate(&self, operation: Operation, credentials: Credentials) -> Result<User> {
        {
            let mut state = self.state.lock().await;
            match *state {
                LifecycleState::Anonymous => {}
                LifecycleState::Authenticated => return Err(WorkspaceError::AlreadyAuthenticated),
                LifecycleState::Authenticating | LifecycleState::LoggingOut => {
                    return Err(WorkspaceError::AuthenticationInProgress)
                }
            }
            *state = LifecycleState::Authenticating;
        }
        self.announce(LifecycleState::Authenticating);

        let response = match operation {
            Operation::Register => self.gateway.register(&credentials).await,
            _ => self.gateway.login(&credentials).await,
        };

        let auth = match response {
            Ok(auth) => auth,
            Err(e) => {
                self.transition(LifecycleState::Anonymous).await;
                return Err(self.fail(operation, e.into()));
            }
        };

        if let Err(e) = self.tokens.store(&auth.token).await {
            self.transition(LifecycleState::Anonymous).await;
            return Err(self.fail(operation, e.into()));
        }

        self.store.replace(Some(auth.user.clone())).await;
        self.transition(LifecycleState::Authenticated).await;
        self.events.publish(WorkspaceEvent::SessionChanged {
            user: Some(auth.user.clone()),
        });

        info!(user_id = %auth.user.id, operation = %operation, "Session established");
        self.navigator.goto(NavigationIntent::home());

        Ok(auth.user)
    }

    /// End the session.
    ///
    /// A no-op while anonymous, even with an unverified token stored, and
    /// when a logout is already running. Whether local state survives a failed server call
    /// depends on the [`LogoutPolicy`].
    pub async fn logout(&self) -> Result<()> {
        let previous = {
            let mut state = self.state.lock().await;
            match *state {
                LifecycleState::LoggingOut => {
                    debug!("Logout already in progress");
                    return Ok(());
                }
                LifecycleState::Authenticating => {
                    return Err(WorkspaceError::AuthenticationInProgress)
                }
                LifecycleState::Anonymous => {
                    debug!("Logout requested while anonymous");
                    return Ok(());
                }
                current => {
                    *state = LifecycleState::LoggingOut;
                    current
                }
            }
        };
        self.announce(LifecycleState::LoggingOut);

        match self.gateway.logout().await {
            Ok(()) => self.clear_local(previous).await,
            Err(e) => match self.logout_policy {
                LogoutPolicy::RequireServerAck => {
                    error!(error = %e, "Logout failed; keeping local session");
                    self.transition(previous).await;
                    Err(self.fail(Operation::Logout, e.into()))
                }
                LogoutPolicy::ClearLocally => {
                    warn!(error = %e, "Logout failed on the server; clearing local session anyway");
                    self.clear_local(previous).await
                }
            },
        }
    }

    async fn clear_local(&self, previous: LifecycleState) -> Result<()> {
        if let Err(e) = self.tokens.clear().await {
            self.transition(previous).await;
            return Err(self.fail(Operation::Logout, e.into()));
        }

        self.store.replace(None).await;
        self.transition(LifecycleState::Anonymous).await;
        self.events
            .publish(WorkspaceEvent::SessionChanged { user: None });

        info!("Logged out");
        self.navigator.goto(NavigationIntent::login());

        Ok(())
    }

    /// Resolve a stored-but-unverified token into a user.
    ///
    /// Returns the user when the server accepts the token and `None` when
    /// there was no token or the server rejected it (the token is then
    /// removed). Transport failures leave the token in place.
    pub async fn rehydrate(&self) -> Result<Option<User>> {
        let session = self.store.current().await;
        if session.user.is_some() {
            return Ok(session.user);
        }
        if session.token.is_none() {
            return Ok(None);
        }

        {
            let mut state = self.state.lock().await;
            if *state != LifecycleState::Anonymous {
                return Err(WorkspaceError::AuthenticationInProgress);
            }
            *state = LifecycleState::Authenticating;
        }
        self.announce(LifecycleState::Authenticating);

        match self.gateway.profile().await {
            Ok(user) => {
                self.store.replace(Some(user.clone())).await;
                self.transition(LifecycleState::Authenticated).await;
                self.events.publish(WorkspaceEvent::SessionChanged {
                    user: Some(user.clone()),
                });
                info!(user_id = %user.id, "Session restored from stored token");
                Ok(Some(user))
            }
            Err(e) if e.is_unauthorized() => {
                info!("Stored token rejected; discarding it");
                if let Err(clear_error) = self.tokens.clear().await {
                    warn!(error = %clear_error, "Failed to remove rejected token");
                }
                self.transition(LifecycleState::Anonymous).await;
                self.events
                    .publish(WorkspaceEvent::SessionChanged { user: None });
                Ok(None)
            }
            Err(e) => {
                self.transition(LifecycleState::Anonymous).await;
                Err(self.fail(Operation::Rehydrate, e.into()))
            }
        }
    }

    async fn transition(&self, next: LifecycleState) {
        *self.state.lock().await = next;
        self.announce(next);
    }

    fn announce(&self, state: LifecycleState) {
        self.events
            .publish(WorkspaceEvent::LifecycleChanged { state });
    }

    fn fail(&self, operation: Operation, error: WorkspaceError) -> WorkspaceError {
        warn!(operation = %operation, error = %error, "Session operation failed");
        self.events.publish(WorkspaceEvent::OperationFailed {
            operation,
            message: error.user_message(),
        });
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::MockNavigator;
    use crate::token_store::MemoryTokenStore;
    use async_trait::async_trait;
    use teamspace_client::{AuthResponse, ClientError};
    use teamspace_core::Project;

    /// Gateway whose auth calls always fail to connect
    struct OfflineGateway;

    #[async_trait]
    impl Gateway for OfflineGateway {
        async fn register(&self, _: &Credentials) -> teamspace_client::Result<AuthResponse> {
            Err(ClientError::ServerUnreachable("offline".into()))
        }
        async fn login(&self, _: &Credentials) -> teamspace_client::Result<AuthResponse> {
            Err(ClientError::ServerUnreachable("offline".into()))
        }
        async fn profile(&self) -> teamspace_client::Result<User> {
            Err(ClientError::ServerUnreachable("offline".into()))
        }
        async fn logout(&self) -> teamspace_client::Result<()> {
            Err(ClientError::ServerUnreachable("offline".into()))
        }
        async fn list_projects(&self) -> teamspace_client::Result<Vec<Project>> {
            Err(ClientError::ServerUnreachable("offline".into()))
        }
        async fn create_project(&self, _: &str) -> teamspace_client::Result<Project> {
            Err(ClientError::ServerUnreachable("offline".into()))
        }
    }

    fn lifecycle(tokens: Arc<MemoryTokenStore>, policy: LogoutPolicy) -> SessionLifecycle {
        let mut navigator = MockNavigator::new();
        navigator.expect_goto().times(0);

        SessionLifecycle::new(
            Arc::new(OfflineGateway),
            Arc::new(SessionStore::new(tokens.clone())),
            tokens,
            Arc::new(navigator),
            EventBus::new(),
            policy,
        )
    }

    #[tokio::test]
    async fn test_failed_login_stays_anonymous_and_persists_nothing() {
        let tokens = Arc::new(MemoryTokenStore::new());
        let lifecycle = lifecycle(tokens.clone(), LogoutPolicy::default());

        let result = lifecycle.login("a@x.com", "pw").await;

        assert!(matches!(result, Err(WorkspaceError::Gateway(_))));
        assert_eq!(lifecycle.state().await, LifecycleState::Anonymous);
        assert_eq!(tokens.load().await, None);
    }

    #[tokio::test]
    async fn test_logout_when_anonymous_is_noop() {
        let tokens = Arc::new(MemoryTokenStore::new());
        let lifecycle = lifecycle(tokens, LogoutPolicy::default());

        assert!(lifecycle.logout().await.is_ok());
        assert!(lifecycle.logout().await.is_ok());
        assert_eq!(lifecycle.state().await, LifecycleState::Anonymous);
    }

    #[tokio::test]
    async fn test_rehydrate_offline_keeps_token() {
        let tokens = Arc::new(MemoryTokenStore::with_token("t1"));
        let lifecycle = lifecycle(tokens.clone(), LogoutPolicy::default());

        assert!(lifecycle.rehydrate().await.is_err());
        assert_eq!(tokens.load().await.as_deref(), Some("t1"));
        assert_eq!(lifecycle.state().await, LifecycleState::Anonymous);
    }

    #[tokio::test]
    async fn test_logout_while_anonymous_with_stored_token_is_noop() {
        let tokens = Arc::new(MemoryTokenStore::with_token("t1"));
        let lifecycle = lifecycle(tokens.clone(), LogoutPolicy::RequireServerAck);

        assert!(lifecycle.logout().await.is_ok());
        assert_eq!(lifecycle.state().await, LifecycleState::Anonymous);
        assert_eq!(tokens.load().await.as_deref(), Some("t1"));
    }
}
