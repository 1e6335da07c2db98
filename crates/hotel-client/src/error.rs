//! Error types for the hotel client

use thiserror::Error;

/// Prefix shown to the user in front of every backend failure
pub const USER_MESSAGE_PREFIX: &str = "Something wrong happened... Please try again later.";

/// Hotel client error
///
/// Errors are `Clone` so a single failed fetch can be replayed to every
/// subscriber of a shared view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request never produced a response (connection refused, DNS, TLS...)
    #[error("An error has occured: Error Message : {0}")]
    Transport(String),

    /// Server answered with a non-2xx status
    #[error("Backend returned code {status}, body was : {body}")]
    Backend { status: u16, body: String },

    /// Response body could not be decoded
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// Client could not be built from its configuration
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// Single textual message surfaced to the UI layer
    pub fn user_message(&self) -> String {
        format!("{}\n{}", USER_MESSAGE_PREFIX, self)
    }

    /// Whether the failure happened before any response was received
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ClientError::Backend {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
