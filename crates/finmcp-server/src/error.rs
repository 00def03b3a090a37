//! Error types for MCP operations

use thiserror::Error;

/// JSON-RPC error codes
pub mod codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;
}

/// Errors that can occur while answering an MCP request
#[derive(Error, Debug)]
pub enum MCPError {
    /// The line was not valid JSON
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Valid JSON that is not a JSON-RPC 2.0 request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Unknown method
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// Method params missing or malformed
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// No prompt is registered under the requested name
    #[error("Prompt not found: {0}")]
    PromptNotFound(String),

    /// Prompt template rendering failed
    #[error("Failed to render prompt '{name}': {detail}")]
    RenderError { name: String, detail: String },

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error on the transport
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl MCPError {
    /// JSON-RPC error code reported for this error
    pub fn code(&self) -> i64 {
        match self {
            MCPError::ParseError(_) => codes::PARSE_ERROR,
            MCPError::InvalidRequest(_) => codes::INVALID_REQUEST,
            MCPError::MethodNotFound(_) => codes::METHOD_NOT_FOUND,
            MCPError::InvalidParams(_) | MCPError::PromptNotFound(_) => codes::INVALID_PARAMS,
            MCPError::RenderError { .. }
            | MCPError::InternalError(_)
            | MCPError::JsonError(_)
            | MCPError::IoError(_) => codes::INTERNAL_ERROR,
        }
    }
}

/// Convert MCPError to finmcp_core::Error
impl From<MCPError> for finmcp_core::Error {
    fn from(err: MCPError) -> Self {
        finmcp_core::Error::ProcessingFailed(err.to_string())
    }
}
