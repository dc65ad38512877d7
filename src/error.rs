//! Custom error types for the Akiba client
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. The type is `Clone` so a single failed
//! in-flight query can be handed to every caller waiting on it.

use thiserror::Error;

use crate::models::ValidationDetail;

/// The main error type for Akiba client operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AkibaError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors for local files
    #[error("JSON error: {0}")]
    Json(String),

    /// Session file storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Client-side form validation, raised before any request is sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// An authorized endpoint was called without a session
    #[error("Not logged in. Run 'akiba auth login' first")]
    NotAuthenticated,

    /// The request never produced a response
    #[error("Network error: {0}")]
    Transport(String),

    /// The API answered with a non-success status
    #[error("{message} (HTTP {status})")]
    Api {
        status: u16,
        message: String,
        details: Vec<ValidationDetail>,
    },

    /// A success response did not match the expected schema
    #[error("Unexpected response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

impl AkibaError {
    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. }) || self.status() == Some(404)
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// True when the session is missing or the API rejected the token
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::NotAuthenticated) || self.status() == Some(401)
    }

    /// HTTP status, for errors that came back from the API
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The text shown to the user after "Failed to ..."
    ///
    /// API errors show the server's first validation message verbatim.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::Transport(_) => "Network request failed".to_string(),
            Self::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for AkibaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AkibaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for AkibaError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Result type alias for Akiba client operations
pub type AkibaResult<T> = Result<T, AkibaError>;
