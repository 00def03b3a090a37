//! MCP tools over the market data provider
//!
//! Tool names are part of the public interface and match what existing
//! clients call.

pub mod market;
pub mod news;
pub mod price_history;
pub mod recommendations;
pub mod search;
pub mod stock_info;

pub use market::MarketNewsTool;
pub use news::StockNewsTool;
pub use price_history::PriceHistoryTool;
pub use recommendations::RecommendationsTool;
pub use search::{SearchTool, SymbolLookupTool};
pub use stock_info::StockInfoTool;

use crate::api::MarketDataProvider;
use crate::config::StockConfig;
use crate::error::StockError;
use finmcp_core::Context;
use finmcp_tools::ToolRegistry;
use serde_json::{Value, json};
use std::sync::Arc;

/// Register every stock tool with `registry`
pub fn register_all(
    registry: &ToolRegistry,
    provider: Arc<dyn MarketDataProvider>,
    config: Arc<StockConfig>,
) {
    registry.register(Arc::new(SymbolLookupTool::new(provider.clone())));
    registry.register(Arc::new(StockNewsTool::new(provider.clone(), config.clone())));
    registry.register(Arc::new(PriceHistoryTool::new(provider.clone())));
    registry.register(Arc::new(SearchTool::new(provider.clone(), config.clone())));
    registry.register(Arc::new(StockInfoTool::new(provider.clone(), config.clone())));
    registry.register(Arc::new(RecommendationsTool::new(provider.clone(), config)));
    registry.register(Arc::new(MarketNewsTool::new(provider)));
}

/// Render a failed operation as tool output, logging it against `ctx`
pub(crate) fn error_text(action: &str, err: &StockError, ctx: &Context) -> String {
    tracing::warn!(parent: ctx.span(), action, error = %err, "tool call failed");
    format!("Error {action}: {err}")
}

/// Trim a symbol argument and reject an empty one
pub(crate) fn require_symbol(symbol: &str) -> finmcp_core::Result<&str> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(StockError::InvalidSymbol("symbol must not be empty".to_string()).into());
    }
    Ok(symbol)
}

pub(crate) fn symbol_schema(description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "symbol": {
                "type": "string",
                "description": description
            }
        },
        "required": ["symbol"]
    })
}
