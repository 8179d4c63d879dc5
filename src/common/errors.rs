//! Error types for the application

use thiserror::Error;

/// Result type alias using our BridgeError
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Main error type for bridge operations
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Request body could not be decoded into a trade
    #[error("{0}")]
    MalformedInput(#[from] serde_json::Error),

    /// Trade queue is at capacity; the producer should retry later
    #[error("queue full")]
    QueueFull,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Socket and other I/O errors from the transport
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for BridgeError {
    fn from(err: config::ConfigError) -> Self {
        BridgeError::Configuration(err.to_string())
    }
}
