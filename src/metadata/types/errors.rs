//! Error types for the metadata boundary

use thiserror::Error;

/// Errors raised where descriptors enter or leave the engine.
#[derive(Debug, Clone, Error)]
pub enum MetadataError {
    /// Entity has no metadata registered anywhere the caller can see
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    /// A descriptor is missing a required attribute
    #[error("Malformed descriptor: {0}")]
    MalformedDescriptor(String),

    /// The descriptor source itself failed (transport, storage)
    #[error("Descriptor source failure: {0}")]
    SourceFailure(String),

    /// Invalid metadata document or registry input
    #[error("Invalid metadata: {0}")]
    InvalidData(String),
}

impl MetadataError {
    /// Create a new source-failure error
    pub fn source_failure(msg: impl Into<String>) -> Self {
        Self::SourceFailure(msg.into())
    }

    /// Create a new invalid-metadata error
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }
}

/// Result type for metadata operations
pub type Result<T> = std::result::Result<T, MetadataError>;
