//! Error types for the Teamspace gateway.

use thiserror::Error;

/// Errors that can occur when talking to the Teamspace API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Server returned an error without a structured body
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Server rejected the request with a structured reason
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Credentials missing, expired, or invalid
    #[error("Not authorized ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// True when the request never got a usable HTTP answer
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::Request(_) | ClientError::ServerUnreachable(_) | ClientError::Server { .. }
        )
    }

    /// True when the server refused the credentials
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized { .. })
    }

    /// HTTP status, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. }
            | ClientError::Rejected { status, .. }
            | ClientError::Unauthorized { status, .. } => Some(*status),
            ClientError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message the server gave for a rejection, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Rejected { message, .. } | ClientError::Unauthorized { message, .. } => {
                Some(message.as_str())
            }
            _ => None,
        }
    }
}

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let server = ClientError::Server {
            status: 502,
            message: "Bad Gateway".into(),
        };
        assert!(server.is_transport());
        assert_eq!(server.status(), Some(502));
        assert_eq!(server.server_message(), None);

        let rejected = ClientError::Rejected {
            status: 400,
            message: "Email must be a valid email".into(),
        };
        assert!(!rejected.is_transport());
        assert_eq!(rejected.server_message(), Some("Email must be a valid email"));

        let unauthorized = ClientError::Unauthorized {
            status: 401,
            message: "Unauthorized User".into(),
        };
        assert!(unauthorized.is_unauthorized());
        assert!(!unauthorized.is_transport());
    }
}
