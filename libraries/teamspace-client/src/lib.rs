//! Teamspace Gateway
//!
//! HTTP client library for the Teamspace project API.
//!
//! # Features
//!
//! - **Authentication**: register, login, profile lookup, logout
//! - **Projects**: list the caller's projects, create a new one
//! - **Credentials**: bearer token read from a [`CredentialSource`] on every request
//!
//! Session logic never talks to reqwest directly; it depends on the
//! [`Gateway`] trait so tests and alternative transports can stand in.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use teamspace_client::{Credentials, Gateway, GatewayConfig, HttpGateway, StaticCredentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GatewayConfig::new("https://teamspace.example.com");
//!     let gateway = HttpGateway::new(config, Arc::new(StaticCredentials::none()))?;
//!
//!     let auth = gateway.login(&Credentials::new("a@x.com", "pw")).await?;
//!     println!("Logged in as {}", auth.user.display_name());
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod credentials;
mod error;
mod gateway;
mod projects;
mod types;

// Re-export main types
pub use client::HttpGateway;
pub use credentials::{CredentialSource, StaticCredentials};
pub use error::{ClientError, Result};
pub use gateway::Gateway;
pub use types::{
    ApiError, AuthResponse, CreateProjectRequest, CreateProjectResponse, Credentials,
    GatewayConfig, ProfileResponse, ProjectListResponse,
};

// Re-export sub-clients for direct use if needed
pub use auth::AuthClient;
pub use projects::ProjectsClient;
