//! Teamspace Session
//!
//! Client-side state for a Teamspace front end: who is logged in, which
//! projects they can see, and the "new project" dialog.
//!
//! This crate provides:
//! - [`SessionStore`]: the in-memory identity plus its durable token
//! - [`SessionLifecycle`]: register / login / logout / rehydrate transitions
//! - [`ProjectDirectory`]: the cached project list, fetched and created through the gateway
//! - [`CreationDialog`]: the Closed → Open → Submitting state machine for new projects
//! - [`Workspace`]: wires the above together from one [`ClientConfig`]
//!
//! # Architecture
//!
//! Nothing here is global. Every controller receives the shared pieces it
//! needs (`Arc<SessionStore>`, `Arc<dyn Gateway>`, [`EventBus`]) at
//! construction. Routing is delegated through the [`Navigator`] trait.
//!
//! No lock is ever held across a network call. State machines move to their
//! in-flight state before the request is sent, so overlapping calls see that
//! state and are rejected instead of racing.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use teamspace_core::NavigationIntent;
//! use teamspace_session::{ClientConfig, Navigator, Workspace};
//!
//! struct PrintNavigator;
//!
//! impl Navigator for PrintNavigator {
//!     fn goto(&self, intent: NavigationIntent) {
//!         println!("-> {}", intent.path);
//!     }
//! }
//!
//! # async fn example() -> teamspace_session::Result<()> {
//! let workspace = Workspace::connect(&ClientConfig::default(), Arc::new(PrintNavigator)).await?;
//!
//! workspace.lifecycle().login("a@x.com", "pw").await?;
//! let projects = workspace.list_projects().await?;
//!
//! let dialog = workspace.dialog();
//! dialog.open().await?;
//! dialog.edit("Roadmap").await?;
//! dialog.submit().await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod dialog;
mod directory;
mod error;
mod events;
mod lifecycle;
mod navigation;
mod store;
mod token_store;
mod workspace;

pub use config::{ClientConfig, SessionSettings};
pub use dialog::{AfterCreate, CreationDialog, DialogState};
pub use directory::ProjectDirectory;
pub use error::{Result, TokenStoreError, WorkspaceError};
pub use events::{EventBus, Operation, WorkspaceEvent};
pub use lifecycle::{LifecycleState, LogoutPolicy, SessionLifecycle};
pub use navigation::Navigator;
pub use store::SessionStore;
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore, TOKEN_KEY};
pub use workspace::Workspace;
