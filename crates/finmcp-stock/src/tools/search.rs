//! `search` and `get_stock_symbol_lookup` tools

use super::error_text;
use crate::api::MarketDataProvider;
use crate::config::StockConfig;
use crate::report::search::INVALID_SEARCH_TYPE;
use crate::report::{SearchType, lookup_report, search_report};
use async_trait::async_trait;
use finmcp_core::{Context, Result};
use finmcp_tools::{Tool, parse_params};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

/// Quotes and news matching a free text query
pub struct SearchTool {
    provider: Arc<dyn MarketDataProvider>,
    config: Arc<StockConfig>,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    query: String,
    search_type: String,
}

impl SearchTool {
    pub fn new(provider: Arc<dyn MarketDataProvider>, config: Arc<StockConfig>) -> Self {
        Self { provider, config }
    }
}

#[async_trait]
impl Tool for SearchTool {
    async fn execute(&self, params: Value, ctx: &Context) -> Result<String> {
        let params: SearchParams = parse_params(params)?;

        let Ok(search_type) = params.search_type.parse::<SearchType>() else {
            return Ok(INVALID_SEARCH_TYPE.to_string());
        };

        Ok(search_report(
            self.provider.as_ref(),
            &params.query,
            search_type,
            self.config.search_max_results,
            self.config.search_news_count,
            ctx,
        )
        .await
        .unwrap_or_else(|e| error_text("searching", &e, ctx)))
    }

    fn name(&self) -> &str {
        "search"
    }

    fn description(&self) -> &str {
        "Fetches and organizes search results from Yahoo Finance, including stock quotes \
         and news articles."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query (ticker symbol or company name)"
                },
                "search_type": {
                    "type": "string",
                    "description": "Type of search results to retrieve ('all', 'quotes', or 'news')",
                    "enum": ["all", "quotes", "news"]
                }
            },
            "required": ["query", "search_type"]
        })
    }
}

/// Best matching ticker for a company name or partial symbol
pub struct SymbolLookupTool {
    provider: Arc<dyn MarketDataProvider>,
}

#[derive(Debug, Deserialize)]
struct LookupParams {
    query: String,
}

impl SymbolLookupTool {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Tool for SymbolLookupTool {
    async fn execute(&self, params: Value, ctx: &Context) -> Result<String> {
        let params: LookupParams = parse_params(params)?;

        Ok(lookup_report(self.provider.as_ref(), params.query.trim(), ctx)
            .await
            .unwrap_or_else(|e| error_text("looking up symbol", &e, ctx)))
    }

    fn name(&self) -> &str {
        "get_stock_symbol_lookup"
    }

    fn description(&self) -> &str {
        "Stock Symbol Lookup - searches for the best-matching symbol based on your query. \
         The query can be anything from a symbol to a security's name, e.g. apple."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Symbol or security name, e.g. apple"
                }
            },
            "required": ["query"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockMarketDataProvider;
    use crate::error::StockError;

    #[tokio::test]
    async fn test_invalid_search_type_skips_provider() {
        let mut provider = MockMarketDataProvider::new();
        provider.expect_search().never();

        let tool = SearchTool::new(Arc::new(provider), Arc::new(StockConfig::default()));
        let out = tool
            .execute(
                json!({"query": "apple", "search_type": "videos"}),
                &Context::detached(),
            )
            .await
            .unwrap();
        assert_eq!(out, INVALID_SEARCH_TYPE);
    }

    #[tokio::test]
    async fn test_lookup_error_is_text() {
        let mut provider = MockMarketDataProvider::new();
        provider
            .expect_search()
            .returning(|_, _, _| Err(StockError::ApiError("HTTP 503".to_string())));

        let tool = SymbolLookupTool::new(Arc::new(provider));
        let out = tool
            .execute(json!({"query": "apple"}), &Context::detached())
            .await
            .unwrap();
        assert_eq!(out, "Error looking up symbol: API error: HTTP 503");
    }
}
