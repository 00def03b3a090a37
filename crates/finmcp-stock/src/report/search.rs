//! Search dispatch

use crate::api::MarketDataProvider;
use crate::error::{Result, StockError};
use finmcp_core::Context;
use serde_json::Value;
use std::str::FromStr;
use tracing::info;

/// Returned for an unrecognised `search_type`
pub const INVALID_SEARCH_TYPE: &str = "Invalid search_type. Use 'all', 'quotes', or 'news'.";

/// Which search sections to return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    All,
    Quotes,
    News,
}

impl FromStr for SearchType {
    type Err = StockError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(SearchType::All),
            "quotes" => Ok(SearchType::Quotes),
            "news" => Ok(SearchType::News),
            _ => Err(StockError::InvalidArgument(INVALID_SEARCH_TYPE.to_string())),
        }
    }
}

/// Search results for `query` as compact JSON
pub async fn search_report(
    provider: &dyn MarketDataProvider,
    query: &str,
    search_type: SearchType,
    max_results: usize,
    news_count: usize,
    ctx: &Context,
) -> Result<String> {
    let results = provider.search(query, max_results, news_count).await?;

    let selected = match search_type {
        SearchType::All => results.all(),
        SearchType::Quotes => Value::Array(results.quotes),
        SearchType::News => Value::Array(results.news),
    };

    info!(parent: ctx.span(), query, ?search_type, "search completed");
    Ok(serde_json::to_string(&selected)?)
}
