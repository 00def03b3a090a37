//! `get_stock_recommendations` tool

use super::{error_text, require_symbol, symbol_schema};
use crate::api::MarketDataProvider;
use crate::config::StockConfig;
use crate::report::recommendations_report;
use async_trait::async_trait;
use finmcp_core::{Context, Result};
use finmcp_tools::{Tool, parse_params};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Analyst recommendation trend
pub struct RecommendationsTool {
    provider: Arc<dyn MarketDataProvider>,
    config: Arc<StockConfig>,
}

#[derive(Debug, Deserialize)]
struct RecommendationsParams {
    symbol: String,
}

impl RecommendationsTool {
    pub fn new(provider: Arc<dyn MarketDataProvider>, config: Arc<StockConfig>) -> Self {
        Self { provider, config }
    }
}

#[async_trait]
impl Tool for RecommendationsTool {
    async fn execute(&self, params: Value, ctx: &Context) -> Result<String> {
        let params: RecommendationsParams = parse_params(params)?;
        let symbol = require_symbol(&params.symbol)?;

        Ok(recommendations_report(
            self.provider.as_ref(),
            symbol,
            self.config.recommendations_limit,
            ctx,
        )
        .await
        .unwrap_or_else(|e| error_text("fetching recommendations", &e, ctx)))
    }

    fn name(&self) -> &str {
        "get_stock_recommendations"
    }

    fn description(&self) -> &str {
        "Fetches analyst recommendations for a specific stock symbol as a markdown table, \
         or a message if unavailable."
    }

    fn input_schema(&self) -> Value {
        symbol_schema("The stock symbol")
    }
}
