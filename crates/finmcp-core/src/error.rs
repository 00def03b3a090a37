//! Error types for finmcp-core

use thiserror::Error;

/// Result type alias for finmcp-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for tool operations
///
/// Provider faults never surface here; tools turn them into descriptive text.
/// These variants cover what is left: calls that could not be made at all.
#[derive(Error, Debug)]
pub enum Error {
    /// Tool arguments were missing or had the wrong shape
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// No tool is registered under the requested name
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Tool processing failed
    #[error("Tool processing failed: {0}")]
    ProcessingFailed(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidParams(err.to_string())
    }
}
