//! Error types for the Taskdeck client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Taskdeck client.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
///
/// The first four variants form the error taxonomy hosts dispatch on:
///
/// - `Validation`: caller input was rejected before dispatch; shown inline.
/// - `Auth`: missing or rejected credential; never shown directly, the
///   global unauthorized signal handles it.
/// - `Network`: the transport failed; hosts show retry messaging.
/// - `Operation`: the backend rejected a well-formed request; hosts show
///   the backend-provided message when available.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum TaskdeckError {
    /// Caller input rejected before any request was dispatched
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing or rejected credential
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Transport-level failure (connect, timeout, body stream)
    #[error("Network error: {0}")]
    Network(String),

    /// Backend rejected a well-formed request
    #[error("Operation failed ({status}): {message}")]
    Operation { status: u16, message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// IO error (preference file operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TaskdeckError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an Auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates an Operation error
    pub fn operation(status: u16, message: impl Into<String>) -> Self {
        Self::Operation {
            status,
            message: message.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an Auth error
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    /// Check if this is a Network error
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Check if this is an Operation error
    pub fn is_operation(&self) -> bool {
        matches!(self, Self::Operation { .. })
    }

    /// The message hosts should display for this error, when one exists.
    ///
    /// `Auth` errors return `None`: they are handled by the global
    /// unauthorized signal, never shown to the user directly.
    pub fn display_message(&self) -> Option<String> {
        match self {
            Self::Auth(_) => None,
            Self::Operation { message, .. } => Some(message.clone()),
            other => Some(other.to_string()),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for TaskdeckError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for TaskdeckError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for TaskdeckError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for TaskdeckError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from String (for error messages)
impl From<String> for TaskdeckError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, TaskdeckError>`.
pub type Result<T> = std::result::Result<T, TaskdeckError>;
