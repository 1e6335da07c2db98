//! Error types for the hotel SDK

use hotel_client::ClientError;
use thiserror::Error;

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

/// SDK error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SdkError {
    /// Backend call failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Form is invalid and cannot be submitted
    #[error("Corrigez les erreurs svp")]
    Validation,

    /// Hotel not found
    #[error("Hotel not found: {0}")]
    NotFound(u64),

    /// The catalogue fold task is gone
    #[error("Hotel catalog closed")]
    CatalogClosed,
}

impl SdkError {
    /// Text shown in the edit screen's dismissible error banner
    pub fn user_message(&self) -> String {
        match self {
            SdkError::Client(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}
