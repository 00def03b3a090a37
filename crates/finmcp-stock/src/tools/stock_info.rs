//! `get_stock_info` tool

use super::{error_text, require_symbol, symbol_schema};
use crate::api::MarketDataProvider;
use crate::config::StockConfig;
use crate::report::security_info_report;
use async_trait::async_trait;
use finmcp_core::{Context, Result};
use finmcp_tools::{Tool, parse_params};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Grouped fundamentals, statements, targets and news for one security
pub struct StockInfoTool {
    provider: Arc<dyn MarketDataProvider>,
    config: Arc<StockConfig>,
}

#[derive(Debug, Deserialize)]
struct StockInfoParams {
    symbol: String,
}

impl StockInfoTool {
    pub fn new(provider: Arc<dyn MarketDataProvider>, config: Arc<StockConfig>) -> Self {
        Self { provider, config }
    }
}

#[async_trait]
impl Tool for StockInfoTool {
    async fn execute(&self, params: Value, ctx: &Context) -> Result<String> {
        let params: StockInfoParams = parse_params(params)?;
        let symbol = require_symbol(&params.symbol)?;

        Ok(
            security_info_report(self.provider.as_ref(), symbol, self.config.news_count, ctx)
                .await
                .unwrap_or_else(|e| error_text("fetching stock info", &e, ctx)),
        )
    }

    fn name(&self) -> &str {
        "get_stock_info"
    }

    fn description(&self) -> &str {
        "Fetches stock information for a symbol, grouped by theme. ETFs and mutual funds get \
         fund metrics; equities get valuation, performance, balance sheet, income statement, \
         cash flow and analyst price targets. Recent news is included for both."
    }

    fn input_schema(&self) -> Value {
        symbol_schema("The stock symbol, or a company name to look up")
    }
}
