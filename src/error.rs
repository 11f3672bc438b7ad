//! Branch Office error types

use thiserror::Error;

/// Branch Office error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document numbering error
    #[error("Numbering error: {0}")]
    Numbering(#[from] crate::numbering::NumberingError),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parse error
    #[error("TOML error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

/// Result type alias for Branch Office operations
pub type Result<T> = std::result::Result<T, Error>;
