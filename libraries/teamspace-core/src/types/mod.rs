//! Domain types for Teamspace

mod ids;
mod navigation;
mod project;
mod session;
mod user;

pub use ids::ResourceId;
pub use navigation::{NavigationIntent, NavigationState, HOME_PATH, LOGIN_PATH, PROJECT_PATH};
pub use project::{CollaboratorRef, Project};
pub use session::Session;
pub use user::User;
