//! Teamspace Core
//!
//! Domain types shared by every Teamspace client crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Identity**: `User` and the opaque `ResourceId` the server hands out
//! - **Workspaces**: `Project` and its collaborator references
//! - **Session**: the pairing of a user with its durable token
//! - **Navigation**: intents handed to whatever front end does the routing
//!
//! # Example
//!
//! ```rust
//! use teamspace_core::{Project, ResourceId, Session, User};
//!
//! let user = User::new(ResourceId::from(1), "Ada");
//! let session = Session::authenticated(user.clone(), "t1");
//! assert!(session.is_consistent());
//!
//! let project = Project::new(ResourceId::from("p1"), "Demo");
//! assert_eq!(project.collaborator_count(), 0);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod types;

pub use types::{
    CollaboratorRef, NavigationIntent, NavigationState, Project, ResourceId, Session, User,
    HOME_PATH, LOGIN_PATH, PROJECT_PATH,
};
