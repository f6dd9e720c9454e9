//! Error types for the patchbay system
//!
//! Validation outcomes are never errors: a bad jack or an unmet requirement
//! is reported as `false` plus an enumerable list. The variants here cover
//! construction and configuration only.

use thiserror::Error;

/// Result type alias for patchbay operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the patchbay system
#[derive(Error, Debug)]
pub enum Error {
    /// Host is not an IP literal or a well-formed domain name
    #[error("Invalid host: {0}")]
    InvalidHost(String),

    /// Port outside the transport range
    #[error("Invalid port: {0} (expected 0..=65535)")]
    InvalidPort(i64),

    /// Protocol name with no matching variant
    #[error("Unknown protocol: {0}")]
    UnknownProtocol(String),

    /// Requirement kind with no registered factory
    #[error("Unknown requirement kind: {0}")]
    UnknownRequirement(String),

    /// A requirement option has the wrong shape
    #[error("Invalid option for requirement {requirement}: {message}")]
    InvalidOption {
        /// Requirement kind
        requirement: String,
        /// What was wrong with the option
        message: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid host error
    pub fn invalid_host(msg: impl Into<String>) -> Self {
        Self::InvalidHost(msg.into())
    }

    /// Create an unknown protocol error
    pub fn unknown_protocol(name: impl Into<String>) -> Self {
        Self::UnknownProtocol(name.into())
    }

    /// Create an unknown requirement error
    pub fn unknown_requirement(kind: impl Into<String>) -> Self {
        Self::UnknownRequirement(kind.into())
    }

    /// Create an invalid requirement option error
    pub fn invalid_option(requirement: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            requirement: requirement.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
