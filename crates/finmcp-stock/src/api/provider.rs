//! Market data provider abstraction

use crate::error::Result;
use crate::models::{
    AnalystPriceTargets, FinancialStatement, Interval, Period, PriceBar, RecommendationTrend,
    SearchResults, SecurityInfo, StatementKind,
};
use async_trait::async_trait;
use serde_json::Value;

/// Source of market data
///
/// Unknown symbols and empty responses are `Ok` with an empty value; `Err`
/// is reserved for transport and decoding faults.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Price bars in ascending timestamp order, prices rounded to cents
    async fn price_history(
        &self,
        symbol: &str,
        period: Period,
        interval: Interval,
    ) -> Result<Vec<PriceBar>>;

    /// Security attributes, `None` when the provider knows nothing
    async fn security_info(&self, symbol: &str) -> Result<Option<SecurityInfo>>;

    async fn financial_statement(
        &self,
        symbol: &str,
        kind: StatementKind,
    ) -> Result<Option<FinancialStatement>>;

    async fn analyst_price_targets(&self, symbol: &str) -> Result<Option<AnalystPriceTargets>>;

    /// Raw news feed items, newest first
    async fn news(&self, symbol: &str, count: usize) -> Result<Vec<Value>>;

    async fn search(
        &self,
        query: &str,
        quotes_count: usize,
        news_count: usize,
    ) -> Result<SearchResults>;

    /// Recommendation trend, current period first
    async fn recommendations(&self, symbol: &str) -> Result<Vec<RecommendationTrend>>;

    /// Market summary entries for a region such as `US`
    async fn market_summary(&self, market: &str) -> Result<Vec<Value>>;
}
