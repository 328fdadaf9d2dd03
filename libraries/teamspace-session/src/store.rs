use crate::token_store::TokenStore;
use std::sync::Arc;
use teamspace_core::{Session, User};
use tokio::sync::RwLock;

/// Holder of the current identity
///
/// One store is created per process and shared by `Arc` with every
/// controller that needs it. `replace` only touches memory; persisting or
/// removing the durable token is the caller's job.
pub struct SessionStore {
    user: RwLock<Option<User>>,
    tokens: Arc<dyn TokenStore>,
}

impl SessionStore {
    /// Start with no user. A token already in `tokens` leaves the session
    /// unverified until the server confirms it.
    pub fn new(tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            user: RwLock::new(None),
            tokens,
        }
    }

    /// Snapshot of the current session
    pub async fn current(&self) -> Session {
        Session {
            user: self.user.read().await.clone(),
            token: self.tokens.load().await,
        }
    }

    pub async fn user(&self) -> Option<User> {
        self.user.read().await.clone()
    }

    /// Set or clear the in-memory user
    pub async fn replace(&self, user: Option<User>) {
        *self.user.write().await = user;
    }

    /// Token stored but user not yet confirmed
    pub async fn is_unverified(&self) -> bool {
        self.current().await.is_unverified()
    }
}
