/// Navigation intents handed to the routing front end
use super::Project;
use serde::{Deserialize, Serialize};

/// Project listing shown after authentication
pub const HOME_PATH: &str = "/";

/// Login screen shown after logout
pub const LOGIN_PATH: &str = "/login";

/// Single-project screen
pub const PROJECT_PATH: &str = "/project";

/// State carried alongside a navigation intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavigationState {
    /// The project the user selected
    Project {
        /// Selected project
        project: Project,
    },
}

/// Request to move the front end to another screen
///
/// The session layer only states where it wants to go; routing is up to the
/// front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationIntent {
    /// Target path
    pub path: String,

    /// Optional state for the target screen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<NavigationState>,
}

impl NavigationIntent {
    /// Navigate to a path with no state
    pub fn to(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            state: None,
        }
    }

    /// Home listing
    pub fn home() -> Self {
        Self::to(HOME_PATH)
    }

    /// Login screen
    pub fn login() -> Self {
        Self::to(LOGIN_PATH)
    }

    /// Project screen, carrying the selected project
    pub fn project(project: Project) -> Self {
        Self {
            path: PROJECT_PATH.to_string(),
            state: Some(NavigationState::Project { project }),
        }
    }
}
