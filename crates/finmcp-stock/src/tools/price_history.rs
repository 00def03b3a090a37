//! `get_price_history` tool

use super::{error_text, require_symbol};
use crate::api::MarketDataProvider;
use crate::error::Result;
use crate::models::{Interval, Period};
use crate::report::price_history_report;
use async_trait::async_trait;
use finmcp_core::{Context, Result as CoreResult};
use finmcp_tools::{Tool, parse_params};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

/// Price bars with RSI, MACD, Bollinger Bands and support/resistance
pub struct PriceHistoryTool {
    provider: Arc<dyn MarketDataProvider>,
}

#[derive(Debug, Deserialize)]
struct PriceHistoryParams {
    symbol: String,
    #[serde(default)]
    period: Option<String>,
    #[serde(default)]
    interval: Option<String>,
}

impl PriceHistoryTool {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    async fn run(&self, symbol: &str, params: &PriceHistoryParams, ctx: &Context) -> Result<String> {
        let period: Period = match params.period.as_deref() {
            Some(raw) => raw.parse()?,
            None => Period::default(),
        };
        let interval: Interval = match params.interval.as_deref() {
            Some(raw) => raw.parse()?,
            None => Interval::default(),
        };

        price_history_report(self.provider.as_ref(), symbol, period, interval, ctx).await
    }
}

#[async_trait]
impl Tool for PriceHistoryTool {
    async fn execute(&self, params: Value, ctx: &Context) -> CoreResult<String> {
        let params: PriceHistoryParams = parse_params(params)?;
        let symbol = require_symbol(&params.symbol)?;

        Ok(self
            .run(symbol, &params, ctx)
            .await
            .unwrap_or_else(|e| error_text("fetching price history", &e, ctx)))
    }

    fn name(&self) -> &str {
        "get_price_history"
    }

    fn description(&self) -> &str {
        "Fetch historical price data for a given stock symbol over a specified period and \
         interval, and calculate RSI, MACD, Bollinger Bands and rolling support/resistance. \
         Returns a markdown table."
    }

    fn input_schema(&self) -> Value {
        let periods: Vec<&str> = Period::ALL.iter().map(|p| p.as_str()).collect();
        let intervals: Vec<&str> = Interval::ALL.iter().map(|i| i.as_str()).collect();

        json!({
            "type": "object",
            "properties": {
                "symbol": {
                    "type": "string",
                    "description": "Stock ticker symbol"
                },
                "period": {
                    "type": "string",
                    "description": "How far back to fetch",
                    "enum": periods,
                    "default": Period::default().as_str()
                },
                "interval": {
                    "type": "string",
                    "description": "Bar width",
                    "enum": intervals,
                    "default": Interval::default().as_str()
                }
            },
            "required": ["symbol"]
        })
    }
}
