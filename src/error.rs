//! Unified error handling for the MetaGrid engine.
//!
//! Engine-internal degradations (relationship cycles, unresolvable
//! relationships, malformed descriptors) are handled locally and reflected
//! in the output shape — they never surface here. This module covers the
//! conditions that do propagate: source failures, IO, and parse errors.

use crate::metadata::types::MetadataError;
use thiserror::Error;

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum MetaGridError {
    /// Metadata boundary or descriptor-source errors
    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),

    /// IO errors (metadata directory access, output files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration file errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input data
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl MetaGridError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new invalid-data error
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }
}

impl From<toml::de::Error> for MetaGridError {
    fn from(error: toml::de::Error) -> Self {
        Self::Config(error.to_string())
    }
}

/// Result type for crate-level operations
pub type MetaGridResult<T> = Result<T, MetaGridError>;
