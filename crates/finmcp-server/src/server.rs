//! Line-delimited JSON-RPC server over stdio
//!
//! Each line on stdin is one JSON-RPC message; each response is written as one
//! line on stdout. Requests are answered in order. Logs must go to stderr.

use crate::Result;
use crate::error::MCPError;
use crate::prompts::PromptRegistry;
use crate::protocol::{
    CallToolParams, GetPromptParams, Implementation, InitializeParams, InitializeResult,
    ListChanged, Request, Response, SUPPORTED_PROTOCOL_VERSIONS, ServerCapabilities,
    ToolDefinition, ToolResult, parse_params,
};
use finmcp_core::{Context, Error};
use finmcp_tools::ToolRegistry;
use serde_json::{Value, json};
use std::sync::{Arc, OnceLock};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

/// MCP server exposing a [`ToolRegistry`] and a [`PromptRegistry`]
pub struct McpServer {
    info: Implementation,
    tools: Arc<ToolRegistry>,
    prompts: PromptRegistry,
    client: OnceLock<String>,
}

impl McpServer {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        tools: Arc<ToolRegistry>,
        prompts: PromptRegistry,
    ) -> Self {
        Self {
            info: Implementation {
                name: name.into(),
                version: version.into(),
            },
            tools,
            prompts,
            client: OnceLock::new(),
        }
    }

    /// Serve on the process's stdin and stdout until stdin closes
    pub async fn serve_stdio(&self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Serve until `reader` reaches end of input
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(
            server = %self.info.name,
            tools = self.tools.len(),
            prompts = self.prompts.len(),
            "MCP server listening on stdio"
        );

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let Some(response) = self.handle_line(&line).await else {
                continue;
            };

            let mut out = serde_json::to_string(&response)?;
            out.push('\n');
            writer.write_all(out.as_bytes()).await?;
            writer.flush().await?;
        }

        info!("stdin closed, MCP server stopping");
        Ok(())
    }

    /// Answer one raw message; `None` for notifications
    pub async fn handle_line(&self, line: &str) -> Option<Response> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "unparseable message");
                return Some(Response::failure(
                    Value::Null,
                    &MCPError::ParseError(e.to_string()),
                ));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: Request = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                return Some(Response::failure(id, &MCPError::InvalidRequest(e.to_string())));
            }
        };
        if request.jsonrpc != crate::protocol::JSONRPC_VERSION {
            return Some(Response::failure(
                id,
                &MCPError::InvalidRequest(format!("unsupported jsonrpc version '{}'", request.jsonrpc)),
            ));
        }

        if request.is_notification() {
            debug!(method = %request.method, "notification");
            return None;
        }

        let method = request.method.clone();
        match self.dispatch(request).await {
            Ok(result) => Some(Response::success(id, result)),
            Err(e) => {
                warn!(method = %method, error = %e, "request failed");
                Some(Response::failure(id, &e))
            }
        }
    }

    async fn dispatch(&self, request: Request) -> std::result::Result<Value, MCPError> {
        match request.method.as_str() {
            "initialize" => self.initialize(parse_params(request.params)?),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.list_tools()),
            "tools/call" => self.call_tool(parse_params(request.params)?).await,
            "prompts/list" => Ok(json!({ "prompts": self.prompts.list() })),
            "prompts/get" => {
                let params: GetPromptParams = parse_params(request.params)?;
                let args = params.arguments.unwrap_or_default();
                Ok(serde_json::to_value(self.prompts.render(&params.name, &args)?)?)
            }
            other => Err(MCPError::MethodNotFound(other.to_string())),
        }
    }

    fn initialize(&self, params: InitializeParams) -> std::result::Result<Value, MCPError> {
        let protocol_version = params
            .protocol_version
            .as_deref()
            .filter(|v| SUPPORTED_PROTOCOL_VERSIONS.contains(v))
            .unwrap_or(SUPPORTED_PROTOCOL_VERSIONS[0])
            .to_string();

        if let Some(client) = &params.client_info {
            info!(client = %client.name, client_version = %client.version, %protocol_version, "client initialized");
            let _ = self.client.set(client.name.clone());
        }

        let result = InitializeResult {
            protocol_version,
            capabilities: ServerCapabilities {
                tools: Some(ListChanged::default()),
                prompts: Some(ListChanged::default()),
            },
            server_info: self.info.clone(),
        };
        Ok(serde_json::to_value(result)?)
    }

    fn list_tools(&self) -> Value {
        let tools: Vec<ToolDefinition> = self
            .tools
            .list_tools()
            .iter()
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                input_schema: tool.input_schema(),
            })
            .collect();
        json!({ "tools": tools })
    }

    async fn call_tool(&self, params: CallToolParams) -> std::result::Result<Value, MCPError> {
        let ctx = Context::for_tool(&params.name);
        if let Some(symbol) = params.arguments.get("symbol").and_then(Value::as_str) {
            ctx.record_symbol(symbol);
        }
        if let Some(client) = self.client.get() {
            ctx.record_client(client);
        }
        info!(parent: ctx.span(), "tool call");

        let result = match self.tools.execute(&params.name, params.arguments, &ctx).await {
            Ok(text) => ToolResult::text(text),
            Err(Error::ToolNotFound(name)) => {
                return Err(MCPError::InvalidParams(format!("Unknown tool: {name}")));
            }
            Err(e) => {
                warn!(parent: ctx.span(), error = %e, "tool call rejected");
                ToolResult::error(e.to_string())
            }
        };
        Ok(serde_json::to_value(result)?)
    }
}
