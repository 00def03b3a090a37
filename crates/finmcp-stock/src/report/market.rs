//! Regional market summary

use crate::api::MarketDataProvider;
use crate::error::Result;
use finmcp_core::Context;
use serde_json::{Map, Value};
use tracing::{info, warn};

/// Market summary entries keyed by exchange, as compact JSON
pub async fn market_summary_report(
    provider: &dyn MarketDataProvider,
    market: &str,
    ctx: &Context,
) -> Result<String> {
    let entries = provider.market_summary(market).await?;

    let mut by_exchange = Map::new();
    for entry in entries {
        let key = entry
            .get("exchange")
            .or_else(|| entry.get("symbol"))
            .and_then(Value::as_str)
            .map(str::to_string);
        match key {
            Some(key) => {
                by_exchange.insert(key, entry);
            }
            None => warn!(parent: ctx.span(), market, "market summary entry without exchange skipped"),
        }
    }

    if by_exchange.is_empty() {
        info!(parent: ctx.span(), market, "no market summary");
        return Ok(format!("No market summary available for {market}."));
    }

    info!(parent: ctx.span(), market, exchanges = by_exchange.len(), "retrieved market summary");
    Ok(serde_json::to_string(&Value::Object(by_exchange))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockMarketDataProvider;
    use serde_json::json;

    #[tokio::test]
    async fn test_keyed_by_exchange() {
        let mut provider = MockMarketDataProvider::new();
        provider
            .expect_market_summary()
            .withf(|market| market == "US")
            .returning(|_| {
                Ok(vec![
                    json!({"exchange": "SNP", "shortName": "S&P 500"}),
                    json!({"exchange": "DJI", "shortName": "Dow 30"}),
                    json!({"shortName": "orphan"}),
                ])
            });

        let out = market_summary_report(&provider, "US", &Context::detached())
            .await
            .unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(parsed["SNP"]["shortName"], "S&P 500");
        assert_eq!(parsed["DJI"]["shortName"], "Dow 30");
        assert_eq!(parsed.as_object().map(Map::len), Some(2));
    }

    #[tokio::test]
    async fn test_empty_summary() {
        let mut provider = MockMarketDataProvider::new();
        provider.expect_market_summary().returning(|_| Ok(Vec::new()));

        let out = market_summary_report(&provider, "US", &Context::detached())
            .await
            .unwrap();
        assert_eq!(out, "No market summary available for US.");
    }
}
