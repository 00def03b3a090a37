//! Tool management and execution framework for finmcp
//!
//! Tools take JSON arguments and always answer with one block of text
//! (JSON or a markdown table) that the protocol server hands to the client.

pub mod registry;
pub mod tool;

pub use registry::ToolRegistry;
pub use tool::{Tool, parse_params};
