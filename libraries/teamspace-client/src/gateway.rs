//! The request/response contract the session layer depends on.

use crate::error::Result;
use crate::types::{AuthResponse, Credentials};
use async_trait::async_trait;
use teamspace_core::{Project, User};

/// Every server call the client makes.
///
/// Implementations attach credentials themselves; callers never pass tokens.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// `POST /users/register`
    async fn register(&self, credentials: &Credentials) -> Result<AuthResponse>;

    /// `POST /users/login`
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse>;

    /// `GET /users/profile`
    async fn profile(&self) -> Result<User>;

    /// `GET /logout`
    async fn logout(&self) -> Result<()>;

    /// `GET /projects/all`
    async fn list_projects(&self) -> Result<Vec<Project>>;

    /// `POST /projects/create`
    async fn create_project(&self, name: &str) -> Result<Project>;
}
