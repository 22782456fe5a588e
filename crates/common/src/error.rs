//! Common error types for Vigil components.
//!
//! Nothing in the monitoring engine is fatal to the process: every error
//! is isolated to its originating check or log artifact and surfaced
//! through logging at the site where it occurred.

use std::fmt;

/// A specialized Result type for Vigil operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for Vigil operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Probe error: {0}")]
    Probe(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Rotation error: {0}")]
    Rotation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new validation error.
    pub fn validation(msg: impl fmt::Display) -> Self {
        Error::Validation(msg.to_string())
    }

    /// Create a new probe error.
    pub fn probe(msg: impl fmt::Display) -> Self {
        Error::Probe(msg.to_string())
    }

    /// Create a new persistence error.
    pub fn persistence(msg: impl fmt::Display) -> Self {
        Error::Persistence(msg.to_string())
    }

    /// Create a new notification error.
    pub fn notification(msg: impl fmt::Display) -> Self {
        Error::Notification(msg.to_string())
    }

    /// Create a new rotation error.
    pub fn rotation(msg: impl fmt::Display) -> Self {
        Error::Rotation(msg.to_string())
    }

    /// Create a new configuration error.
    pub fn config(msg: impl fmt::Display) -> Self {
        Error::Config(msg.to_string())
    }
}
