//! Error types for chorale

use thiserror::Error;

/// Main error type for chorale operations
#[derive(Debug, Error)]
pub enum ChoraleError {
    /// Error in solver configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error in the progression or piece description
    #[error("Model error: {0}")]
    Model(String),

    /// Solving was cancelled before any result was produced
    #[error("Solving was cancelled")]
    Cancelled,

    /// Invalid operation for the current state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for chorale operations
pub type Result<T> = std::result::Result<T, ChoraleError>;
