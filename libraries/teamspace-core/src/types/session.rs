/// Session domain type
use super::User;
use serde::{Deserialize, Serialize};

/// Authenticated identity paired with its durable token
///
/// `token` is present exactly when `user` is present once the session is
/// fully synchronized. A token without a user is the "unverified" window
/// between process start and the first authenticated response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Current user, if known
    pub user: Option<User>,

    /// Durable credential, if one is stored
    #[serde(skip_serializing)]
    pub token: Option<String>,
}

impl Session {
    /// Session with no identity
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Fully synchronized session
    pub fn authenticated(user: User, token: impl Into<String>) -> Self {
        Self {
            user: Some(user),
            token: Some(token.into()),
        }
    }

    /// True when both halves agree (both present or both absent)
    pub fn is_consistent(&self) -> bool {
        self.user.is_some() == self.token.is_some()
    }

    /// True when a token is stored but the user is not yet known
    pub fn is_unverified(&self) -> bool {
        self.token.is_some() && self.user.is_none()
    }

    /// True when a user and its token are both present
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }
}
