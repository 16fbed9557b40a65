//! Error types for BEX

use thiserror::Error;

/// Core error type for BEX operations
#[derive(Error, Debug)]
pub enum BexError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Resolution error: {0}")]
    Resolution(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not supported: {0}")]
    NotSupported(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for BEX operations
pub type Result<T> = std::result::Result<T, BexError>;
