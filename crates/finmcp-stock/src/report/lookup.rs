//! Best matching symbol for a free text query

use crate::api::MarketDataProvider;
use crate::error::Result;
use finmcp_core::Context;
use tracing::info;

/// Symbol of the first search quote, if any
pub async fn lookup_symbol(
    provider: &dyn MarketDataProvider,
    query: &str,
    ctx: &Context,
) -> Result<Option<String>> {
    let results = provider.search(query, 1, 0).await?;
    let symbol = results.first_symbol().map(str::to_string);
    info!(parent: ctx.span(), query, symbol = ?symbol, "symbol lookup");
    Ok(symbol)
}

pub(crate) fn no_symbols_message(query: &str) -> String {
    format!("No symbols found matching '{query}'.")
}

/// The best matching symbol, or a message saying there is none
pub async fn lookup_report(
    provider: &dyn MarketDataProvider,
    query: &str,
    ctx: &Context,
) -> Result<String> {
    Ok(lookup_symbol(provider, query, ctx)
        .await?
        .unwrap_or_else(|| no_symbols_message(query)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockMarketDataProvider;
    use crate::models::SearchResults;
    use serde_json::json;

    #[tokio::test]
    async fn test_lookup_first_quote() {
        let mut provider = MockMarketDataProvider::new();
        provider
            .expect_search()
            .withf(|query, quotes, news| query == "apple" && *quotes == 1 && *news == 0)
            .returning(|_, _, _| {
                Ok(SearchResults {
                    quotes: vec![json!({"symbol": "AAPL"}), json!({"symbol": "APLE"})],
                    ..Default::default()
                })
            });

        let out = lookup_report(&provider, "apple", &Context::detached())
            .await
            .unwrap();
        assert_eq!(out, "AAPL");
    }

    #[tokio::test]
    async fn test_lookup_no_match() {
        let mut provider = MockMarketDataProvider::new();
        provider
            .expect_search()
            .returning(|_, _, _| Ok(SearchResults::default()));

        let out = lookup_report(&provider, "qwxz", &Context::detached())
            .await
            .unwrap();
        assert_eq!(out, "No symbols found matching 'qwxz'.");
    }
}
