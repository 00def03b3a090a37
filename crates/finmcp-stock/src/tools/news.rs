//! `get_stock_news` tool

use super::{error_text, require_symbol, symbol_schema};
use crate::api::MarketDataProvider;
use crate::config::StockConfig;
use crate::report::news_report;
use async_trait::async_trait;
use finmcp_core::{Context, Result};
use finmcp_tools::{Tool, parse_params};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Recent news articles for one symbol
pub struct StockNewsTool {
    provider: Arc<dyn MarketDataProvider>,
    config: Arc<StockConfig>,
}

#[derive(Debug, Deserialize)]
struct NewsParams {
    symbol: String,
}

impl StockNewsTool {
    pub fn new(provider: Arc<dyn MarketDataProvider>, config: Arc<StockConfig>) -> Self {
        Self { provider, config }
    }
}

#[async_trait]
impl Tool for StockNewsTool {
    async fn execute(&self, params: Value, ctx: &Context) -> Result<String> {
        let params: NewsParams = parse_params(params)?;
        let symbol = require_symbol(&params.symbol)?;

        Ok(
            news_report(self.provider.as_ref(), symbol, self.config.news_count, ctx)
                .await
                .unwrap_or_else(|e| error_text("fetching news", &e, ctx)),
        )
    }

    fn name(&self) -> &str {
        "get_stock_news"
    }

    fn description(&self) -> &str {
        "Fetches recent news articles related to a specific stock symbol with title, summary, \
         and publication date."
    }

    fn input_schema(&self) -> Value {
        symbol_schema("The stock symbol")
    }
}
