//! Tool trait definition

use async_trait::async_trait;
use finmcp_core::{Context, Result};
use serde_json::Value;

/// Trait for tools the protocol server exposes
///
/// Each tool must provide a name, description, and JSON schema for its input.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with given parameters
    ///
    /// # Arguments
    ///
    /// * `params` - Tool input as JSON value (should match input_schema)
    /// * `ctx` - Request context carrying the logging span
    ///
    /// # Returns
    ///
    /// The text answer. Expected-empty results and provider faults are both
    /// reported as text; `Err` is reserved for arguments that could not be
    /// understood at all.
    async fn execute(&self, params: Value, ctx: &Context) -> Result<String>;

    /// Get the tool's name
    ///
    /// Must be unique within a ToolRegistry
    fn name(&self) -> &str;

    /// Get the tool's description
    ///
    /// This description helps the calling agent decide when to use this tool
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    ///
    /// // Example schema for a symbol-based tool:
    /// let schema = json!({
    ///     "type": "object",
    ///     "properties": {
    ///         "symbol": { "type": "string" }
    ///     },
    ///     "required": ["symbol"]
    /// });
    /// ```
    fn input_schema(&self) -> Value;
}

/// Deserialize tool arguments, treating a missing/`null` payload as `{}`
///
/// MCP clients omit `arguments` for tools without parameters.
pub fn parse_params<T: serde::de::DeserializeOwned>(params: Value) -> Result<T> {
    let params = if params.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        params
    };
    Ok(serde_json::from_value(params)?)
}
