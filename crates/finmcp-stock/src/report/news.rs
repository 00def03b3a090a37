//! News projection

use crate::api::MarketDataProvider;
use crate::error::Result;
use crate::models::NewsItem;
use finmcp_core::Context;
use serde_json::Value;
use tracing::info;

/// Reduce raw feed items to title, summary and publication date
///
/// Items without an object `content` are skipped.
pub fn project_news(items: &[Value]) -> Vec<NewsItem> {
    items.iter().filter_map(NewsItem::from_raw).collect()
}

/// Recent news for `symbol` as a pretty printed JSON array
pub async fn news_report(
    provider: &dyn MarketDataProvider,
    symbol: &str,
    count: usize,
    ctx: &Context,
) -> Result<String> {
    let items = provider.news(symbol, count).await?;
    if items.is_empty() {
        info!(parent: ctx.span(), symbol, "no news found");
        return Ok(format!("No news articles found for {symbol}."));
    }

    let projected = project_news(&items);
    info!(parent: ctx.span(), symbol, articles = projected.len(), "retrieved news");
    Ok(serde_json::to_string_pretty(&projected)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockMarketDataProvider;
    use serde_json::json;

    #[tokio::test]
    async fn test_news_report() {
        let mut provider = MockMarketDataProvider::new();
        provider
            .expect_news()
            .withf(|symbol, count| symbol == "TSLA" && *count == 10)
            .returning(|_, _| {
                Ok(vec![
                    json!({"content": {"title": "Deliveries up", "summary": "Q3", "pubDate": "2024-10-02"}}),
                    json!({"id": "no-content"}),
                    json!({"content": {"title": "Robotaxi day"}}),
                ])
            });

        let out = news_report(&provider, "TSLA", 10, &Context::detached())
            .await
            .unwrap();
        let parsed: Vec<NewsItem> = serde_json::from_str(&out).unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].title, "Deliveries up");
        assert_eq!(parsed[1].summary, "No summary");
        assert_eq!(parsed[1].pub_date, "No date");
        assert!(out.contains('\n'));
    }

    #[tokio::test]
    async fn test_no_news() {
        let mut provider = MockMarketDataProvider::new();
        provider.expect_news().returning(|_, _| Ok(Vec::new()));

        let out = news_report(&provider, "ZZZZ", 10, &Context::detached())
            .await
            .unwrap();
        assert_eq!(out, "No news articles found for ZZZZ.");
    }
}
