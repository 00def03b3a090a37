//! `get_US_market_news` tool

use super::error_text;
use crate::api::MarketDataProvider;
use crate::report::market_summary_report;
use async_trait::async_trait;
use finmcp_core::{Context, Result};
use finmcp_tools::Tool;
use serde_json::{Value, json};
use std::sync::Arc;

const MARKET: &str = "US";

/// US market summary by exchange
pub struct MarketNewsTool {
    provider: Arc<dyn MarketDataProvider>,
}

impl MarketNewsTool {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Tool for MarketNewsTool {
    async fn execute(&self, _params: Value, ctx: &Context) -> Result<String> {
        Ok(market_summary_report(self.provider.as_ref(), MARKET, ctx)
            .await
            .unwrap_or_else(|e| error_text("fetching market summary", &e, ctx)))
    }

    fn name(&self) -> &str {
        "get_US_market_news"
    }

    fn description(&self) -> &str {
        "Fetches the current US market summary: major indices and their latest moves, \
         keyed by exchange."
    }

    fn input_schema(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }
}
