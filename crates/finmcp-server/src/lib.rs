//! Model Context Protocol (MCP) server for finmcp
//!
//! This crate serves the tools in a [`finmcp_tools::ToolRegistry`] to MCP
//! clients over stdio:
//! - JSON-RPC 2.0, one message per line
//! - `initialize`, `ping`, `tools/list`, `tools/call`, `prompts/list`, `prompts/get`
//! - Notifications are accepted and never answered
//!
//! # Example
//!
//! ```no_run
//! use finmcp_server::{McpServer, PromptRegistry};
//! use finmcp_tools::ToolRegistry;
//! use std::sync::Arc;
//!
//! # async fn example() -> finmcp_server::Result<()> {
//! let tools = Arc::new(ToolRegistry::new());
//! let server = McpServer::new("finmcp", "0.1.0", tools, PromptRegistry::builtin());
//! server.serve_stdio().await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod prompts;
pub mod protocol;
pub mod server;

pub use error::MCPError;
pub use prompts::PromptRegistry;
pub use server::McpServer;

/// Result type for MCP operations
pub type Result<T> = std::result::Result<T, MCPError>;
