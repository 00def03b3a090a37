//! Request context handed to every tool invocation
//!
//! The `Context` carries the logging capability for one request: a
//! `tracing::Span` tagged with a request id and the tool name. Operations emit
//! their events with `parent: ctx.span()` instead of reaching for a
//! process-wide logger, so every warning about a skipped indicator or a
//! missing statement is attributed to the call that produced it.
//!
//! The symbol being served and the MCP client name are recorded on the span
//! once known, and show up on every event emitted under it.

use tracing::Span;

/// Span fields filled in after the span is created
pub mod fields {
    /// Ticker symbol the request is about
    pub const SYMBOL: &str = "symbol";
    /// Client name reported during `initialize`
    pub const CLIENT: &str = "client";
}

/// Context passed to tools during execution
///
/// # Example
///
/// ```
/// use finmcp_core::Context;
///
/// let ctx = Context::for_tool("get_price_history");
/// ctx.record_symbol("AAPL");
///
/// assert_eq!(ctx.tool(), "get_price_history");
/// tracing::info!(parent: ctx.span(), "fetching price history");
/// ```
#[derive(Debug, Clone)]
pub struct Context {
    request_id: String,
    tool: String,
    span: Span,
}

impl Context {
    /// Create a context for one invocation of `tool`
    ///
    /// A fresh request id is generated and attached to the span.
    pub fn for_tool(tool: impl Into<String>) -> Self {
        let tool = tool.into();
        let request_id = uuid::Uuid::new_v4().to_string();
        let span = tracing::info_span!(
            "tool_call",
            tool = %tool,
            request_id = %request_id,
            symbol = tracing::field::Empty,
            client = tracing::field::Empty
        );
        Self {
            request_id,
            tool,
            span,
        }
    }

    /// Create a context whose span is disabled
    ///
    /// Used by tests and by callers that do not want request logging.
    pub fn detached() -> Self {
        Self {
            request_id: String::new(),
            tool: String::new(),
            span: Span::none(),
        }
    }

    /// Span all events for this request should be parented to
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Request id (empty for detached contexts)
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Tool name
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Tag the span with the symbol this request is about
    pub fn record_symbol(&self, symbol: &str) {
        self.span.record(fields::SYMBOL, symbol);
    }

    /// Tag the span with the calling client's name
    pub fn record_client(&self, client: &str) {
        self.span.record(fields::CLIENT, client);
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::detached()
    }
}
