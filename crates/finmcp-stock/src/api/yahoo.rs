//! Yahoo Finance API client

use crate::api::provider::MarketDataProvider;
use crate::config::{StockConfig, YahooEndpoints};
use crate::error::{Result, StockError};
use crate::models::{
    AnalystPriceTargets, FinancialStatement, Interval, Period, PriceBar, RecommendationTrend,
    SearchResults, SecurityInfo, StatementKind,
};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use chrono_tz::Tz;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::{Map, Value, json};
use std::num::NonZeroU32;
use std::sync::Arc;
use url::Url;
use yahoo_finance_api as yahoo;

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

const PROVIDER: &str = "Yahoo Finance";

/// quoteSummary modules merged into the flat attribute map
const INFO_MODULES: &[&str] = &[
    "financialData",
    "quoteType",
    "defaultKeyStatistics",
    "assetProfile",
    "summaryDetail",
    "price",
    "fundProfile",
    "summaryProfile",
];

/// Earliest period requested from the fundamentals timeseries (2015-08-22)
const TIMESERIES_START: i64 = 1_440_201_600;

/// Yahoo Finance API client
pub struct YahooFinanceClient {
    http: Client,
    connector: yahoo::YahooConnector,
    endpoints: YahooEndpoints,
    rate_limiter: SharedRateLimiter,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client
    pub fn new(config: &StockConfig) -> Result<Self> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        let connector = yahoo::YahooConnector::new()
            .map_err(|e| StockError::YahooFinanceError(e.to_string()))?;

        let quota = Quota::per_minute(
            NonZeroU32::new(config.rate_limit_per_minute).unwrap_or(NonZeroU32::MIN),
        );

        Ok(Self {
            http,
            connector,
            endpoints: config.endpoints.clone(),
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        })
    }

    /// Send a rate limited request and decode its JSON body
    ///
    /// A 404 is reported as `Ok(None)`.
    async fn send_json(&self, request: RequestBuilder) -> Result<Option<Value>> {
        self.rate_limiter.until_ready().await;

        let response = request.send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => {
                tracing::debug!(url = %response.url(), "provider answered 404");
                Ok(None)
            }
            StatusCode::TOO_MANY_REQUESTS => Err(StockError::RateLimitExceeded {
                provider: PROVIDER.to_string(),
            }),
            _ => Ok(Some(response.error_for_status()?.json().await?)),
        }
    }

    /// Fetch a session cookie and the crumb bound to it
    async fn crumb(&self) -> Result<String> {
        self.rate_limiter.until_ready().await;
        // The cookie endpoint answers with an error status; only Set-Cookie matters
        if let Err(e) = self.http.get(&self.endpoints.cookie).send().await {
            tracing::debug!(error = %e, "cookie request failed");
        }

        self.rate_limiter.until_ready().await;
        let url = endpoint(&self.endpoints.query1, &["v1", "test", "getcrumb"])?;
        let crumb = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let crumb = crumb.trim();
        if crumb.is_empty() || crumb.contains('<') || crumb.contains(' ') {
            return Err(StockError::ApiError(format!(
                "{PROVIDER} returned an invalid crumb"
            )));
        }
        Ok(crumb.to_string())
    }

    /// Raw quoteSummary result keyed by module name
    async fn quote_summary(
        &self,
        symbol: &str,
        modules: &[&str],
    ) -> Result<Option<Map<String, Value>>> {
        let crumb = self.crumb().await?;
        let url = endpoint(
            &self.endpoints.query2,
            &["v10", "finance", "quoteSummary", symbol],
        )?;
        let request = self.http.get(url).query(&[
            ("modules", modules.join(",").as_str()),
            ("formatted", "false"),
            ("crumb", crumb.as_str()),
        ]);

        let Some(body) = self.send_json(request).await? else {
            return Ok(None);
        };

        Ok(body
            .pointer("/quoteSummary/result/0")
            .and_then(Value::as_object)
            .cloned())
    }
}

#[async_trait]
impl MarketDataProvider for YahooFinanceClient {
    async fn price_history(
        &self,
        symbol: &str,
        period: Period,
        interval: Interval,
    ) -> Result<Vec<PriceBar>> {
        self.rate_limiter.until_ready().await;

        let response = match self
            .connector
            .get_quote_range(symbol, interval.as_str(), period.provider_range())
            .await
        {
            Ok(response) => response,
            Err(e) if is_not_found(&e.to_string()) => {
                tracing::debug!(symbol, error = %e, "no chart data");
                return Ok(Vec::new());
            }
            Err(e) => return Err(StockError::YahooFinanceError(e.to_string())),
        };

        // An empty chart is reported as an error by the connector
        let quotes = match response.quotes() {
            Ok(quotes) => quotes,
            Err(e) => {
                tracing::debug!(symbol, error = %e, "chart response has no quotes");
                return Ok(Vec::new());
            }
        };

        let exchange_tz = response
            .metadata()
            .ok()
            .and_then(|meta| match meta.exchange_timezone_name.parse::<Tz>() {
                Ok(tz) => Some(tz),
                Err(_) => {
                    tracing::debug!(
                        symbol,
                        timezone = %meta.exchange_timezone_name,
                        "unknown exchange timezone, using UTC"
                    );
                    None
                }
            });

        let mut bars: Vec<PriceBar> = quotes
            .iter()
            .filter_map(|q| {
                let timestamp = exchange_time(q.timestamp as i64, exchange_tz)?;
                Some(
                    PriceBar {
                        timestamp,
                        open: q.open,
                        high: q.high,
                        low: q.low,
                        close: q.close,
                        volume: q.volume,
                    }
                    .rounded(),
                )
            })
            .collect();
        bars.sort_by_key(|bar| bar.timestamp);

        Ok(bars)
    }

    async fn security_info(&self, symbol: &str) -> Result<Option<SecurityInfo>> {
        let Some(summary) = self.quote_summary(symbol, INFO_MODULES).await? else {
            return Ok(None);
        };

        let attributes = flatten_modules(&summary);
        if attributes.is_empty() {
            return Ok(None);
        }
        Ok(Some(SecurityInfo::from_attributes(&attributes)))
    }

    async fn financial_statement(
        &self,
        symbol: &str,
        kind: StatementKind,
    ) -> Result<Option<FinancialStatement>> {
        let types: Vec<String> = kind
            .line_items()
            .iter()
            .map(|item| kind.series_name(*item))
            .collect();

        let url = endpoint(
            &self.endpoints.query2,
            &[
                "ws",
                "fundamentals-timeseries",
                "v1",
                "finance",
                "timeseries",
                symbol,
            ],
        )?;
        let request = self.http.get(url).query(&[
            ("symbol", symbol.to_string()),
            ("type", types.join(",")),
            ("period1", TIMESERIES_START.to_string()),
            ("period2", Utc::now().timestamp().to_string()),
        ]);

        let Some(body) = self.send_json(request).await? else {
            return Ok(None);
        };

        let statement = parse_timeseries(&body, kind);
        Ok((!statement.is_empty()).then_some(statement))
    }

    async fn analyst_price_targets(&self, symbol: &str) -> Result<Option<AnalystPriceTargets>> {
        let Some(summary) = self.quote_summary(symbol, &["financialData"]).await? else {
            return Ok(None);
        };

        let financial = summary.get("financialData").unwrap_or(&Value::Null);
        let targets = AnalystPriceTargets {
            current: raw_number(financial.get("currentPrice")),
            high: raw_number(financial.get("targetHighPrice")),
            low: raw_number(financial.get("targetLowPrice")),
            mean: raw_number(financial.get("targetMeanPrice")),
            median: raw_number(financial.get("targetMedianPrice")),
        };

        Ok((!targets.is_empty()).then_some(targets))
    }

    async fn news(&self, symbol: &str, count: usize) -> Result<Vec<Value>> {
        let url = endpoint(&self.endpoints.root, &["xhr", "ncp"])?;
        let request = self
            .http
            .post(url)
            .query(&[("queryRef", "latestNews"), ("serviceKey", "ncp_fin")])
            .json(&json!({
                "serviceConfig": {
                    "snippetCount": count,
                    "s": [symbol],
                }
            }));

        let Some(body) = self.send_json(request).await? else {
            return Ok(Vec::new());
        };

        let stream = body
            .pointer("/data/tickerStream/stream")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        Ok(stream
            .into_iter()
            .filter(|item| !is_advert(item))
            .take(count)
            .collect())
    }

    async fn search(
        &self,
        query: &str,
        quotes_count: usize,
        news_count: usize,
    ) -> Result<SearchResults> {
        let url = endpoint(&self.endpoints.query2, &["v1", "finance", "search"])?;
        let request = self.http.get(url).query(&[
            ("q", query.to_string()),
            ("quotesCount", quotes_count.to_string()),
            ("newsCount", news_count.to_string()),
            ("listsCount", "0".to_string()),
            ("enableFuzzyQuery", "false".to_string()),
        ]);

        match self.send_json(request).await? {
            Some(body) => Ok(serde_json::from_value(body)?),
            None => Ok(SearchResults::default()),
        }
    }

    async fn recommendations(&self, symbol: &str) -> Result<Vec<RecommendationTrend>> {
        let Some(summary) = self
            .quote_summary(symbol, &["recommendationTrend"])
            .await?
        else {
            return Ok(Vec::new());
        };

        match summary.get("recommendationTrend").and_then(|m| m.get("trend")) {
            Some(trend) => Ok(serde_json::from_value(trend.clone())?),
            None => Ok(Vec::new()),
        }
    }

    async fn market_summary(&self, market: &str) -> Result<Vec<Value>> {
        let crumb = self.crumb().await?;
        let url = endpoint(
            &self.endpoints.query1,
            &["v6", "finance", "quote", "marketSummary"],
        )?;
        let request = self.http.get(url).query(&[
            (
                "fields",
                "shortName,regularMarketPrice,regularMarketChange,regularMarketChangePercent",
            ),
            ("formatted", "false"),
            ("lang", "en-US"),
            ("market", market),
            ("crumb", crumb.as_str()),
        ]);

        let Some(body) = self.send_json(request).await? else {
            return Ok(Vec::new());
        };

        Ok(body
            .pointer("/marketSummaryResponse/result")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default())
    }
}

/// Epoch seconds as a timestamp in the exchange's zone, UTC when unknown
fn exchange_time(secs: i64, tz: Option<Tz>) -> Option<DateTime<FixedOffset>> {
    let utc = DateTime::<Utc>::from_timestamp(secs, 0)?;
    Some(match tz {
        Some(tz) => utc.with_timezone(&tz).fixed_offset(),
        None => utc.fixed_offset(),
    })
}

/// Join path segments onto a base URL
///
/// Characters that would split or end a segment (`/`, `?`, `#`, space) are
/// escaped; index symbols such as `^GSPC` are passed through as Yahoo expects.
fn endpoint(base: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|()| StockError::ConfigError(format!("{base} cannot be a base URL")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn is_not_found(message: &str) -> bool {
    message.contains("404") || message.contains("Not Found") || message.contains("No data")
}

fn is_advert(item: &Value) -> bool {
    item.get("ad")
        .is_some_and(|ad| !ad.is_null() && ad != &Value::Array(Vec::new()))
}

/// Unwrap a `{raw, fmt}` pair or pass a plain number through
fn raw_number(value: Option<&Value>) -> Option<f64> {
    let value = value?;
    value
        .get("raw")
        .unwrap_or(value)
        .as_f64()
        .filter(|v| v.is_finite())
}

/// Merge quoteSummary modules into one flat attribute map
///
/// Scalars are copied, `{raw, fmt}` pairs are reduced to `raw`, nested
/// structures are dropped. The first module to supply a key wins.
fn flatten_modules(summary: &Map<String, Value>) -> Map<String, Value> {
    let mut flat = Map::new();

    for module in summary.values().filter_map(Value::as_object) {
        for (key, value) in module {
            if key == "maxAge" {
                continue;
            }
            let scalar = match value {
                Value::Object(pair) => match pair.get("raw") {
                    Some(raw) if !raw.is_object() && !raw.is_array() => raw.clone(),
                    _ => continue,
                },
                Value::Array(_) | Value::Null => continue,
                other => other.clone(),
            };
            flat.entry(key.clone()).or_insert(scalar);
        }
    }

    if !flat.contains_key("fiftyTwoWeekRange") {
        let low = flat.get("fiftyTwoWeekLow").and_then(Value::as_f64);
        let high = flat.get("fiftyTwoWeekHigh").and_then(Value::as_f64);
        if let (Some(low), Some(high)) = (low, high) {
            flat.insert(
                "fiftyTwoWeekRange".to_string(),
                Value::String(format!("{low} - {high}")),
            );
        }
    }

    flat
}

/// Collect the timeseries entries that belong to `kind`
fn parse_timeseries(body: &Value, kind: StatementKind) -> FinancialStatement {
    let mut statement = FinancialStatement::new(kind);

    let results = body
        .pointer("/timeseries/result")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for result in results {
        let Some(series) = result.pointer("/meta/type/0").and_then(Value::as_str) else {
            continue;
        };
        let Some(item) = kind.line_item_for(series) else {
            continue;
        };
        let Some(entries) = result.get(series).and_then(Value::as_array) else {
            continue;
        };

        for entry in entries {
            let date = entry
                .get("asOfDate")
                .and_then(Value::as_str)
                .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());
            let value = raw_number(entry.get("reportedValue"));
            if let (Some(date), Some(value)) = (date, value) {
                statement.insert(item, date, value);
            }
        }
    }

    statement
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attribute, LineItem, SecurityKind};
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> YahooFinanceClient {
        let config = StockConfig::builder()
            .endpoints(YahooEndpoints::single(server.uri()))
            .request_timeout(Duration::from_secs(5))
            .rate_limit_per_minute(600)
            .build()
            .unwrap();
        YahooFinanceClient::new(&config).unwrap()
    }

    async fn mount_session(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(404).insert_header("set-cookie", "A3=d=AQABBA; Path=/"))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/test/getcrumb"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Xyz123abc"))
            .mount(server)
            .await;
    }

    #[test]
    fn test_flatten_modules() {
        let summary = json!({
            "price": {
                "maxAge": 1,
                "symbol": "AAPL",
                "regularMarketPrice": {"raw": 189.84, "fmt": "189.84"},
                "quoteType": "EQUITY",
                "postMarketSource": {},
            },
            "summaryDetail": {
                "fiftyTwoWeekLow": 164.08,
                "fiftyTwoWeekHigh": 199.62,
                "symbol": "IGNORED",
            },
            "assetProfile": {"companyOfficers": [{"name": "Tim"}]},
        });

        let flat = flatten_modules(summary.as_object().unwrap());
        assert_eq!(flat["regularMarketPrice"], json!(189.84));
        assert_eq!(flat["symbol"], json!("AAPL"));
        assert_eq!(flat["fiftyTwoWeekRange"], json!("164.08 - 199.62"));
        assert!(!flat.contains_key("maxAge"));
        assert!(!flat.contains_key("postMarketSource"));
        assert!(!flat.contains_key("companyOfficers"));
    }

    #[test]
    fn test_exchange_time_follows_dst() {
        let winter = exchange_time(1_704_205_800, Some(Tz::America__New_York)).unwrap();
        assert_eq!(winter.to_rfc3339(), "2024-01-02T09:30:00-05:00");

        let summer = exchange_time(1_719_927_000, Some(Tz::America__New_York)).unwrap();
        assert_eq!(summer.to_rfc3339(), "2024-07-02T09:30:00-04:00");

        let utc = exchange_time(1_704_205_800, None).unwrap();
        assert_eq!(utc.to_rfc3339(), "2024-01-02T14:30:00+00:00");
    }

    #[test]
    fn test_endpoint_escapes_segment_delimiters() {
        let url = endpoint("https://query2.example.com/", &["v10", "finance", "quoteSummary", "^GSPC"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://query2.example.com/v10/finance/quoteSummary/^GSPC"
        );

        let url = endpoint("https://query2.example.com", &["quoteSummary", "BRK/B?x"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://query2.example.com/quoteSummary/BRK%2FB%3Fx"
        );
        assert_eq!(url.path_segments().unwrap().count(), 2);
    }

    #[test]
    fn test_parse_timeseries() {
        let body = json!({
            "timeseries": {"result": [
                {
                    "meta": {"symbol": ["AAPL"], "type": ["annualTotalAssets"]},
                    "annualTotalAssets": [
                        null,
                        {"asOfDate": "2022-09-30", "reportedValue": {"raw": 352_755_000_000.0_f64}},
                        {"asOfDate": "2023-09-30", "reportedValue": {"raw": 352_583_000_000.0_f64}}
                    ]
                },
                {
                    "meta": {"symbol": ["AAPL"], "type": ["annualNetPPE"]},
                    "annualNetPPE": [{"asOfDate": "2023-09-30", "reportedValue": {"raw": 43_715_000_000.0_f64}}]
                },
                {
                    "meta": {"symbol": ["AAPL"], "type": ["quarterlyTotalRevenue"]},
                    "quarterlyTotalRevenue": [{"asOfDate": "2023-12-30", "reportedValue": {"raw": 1.0}}]
                }
            ]}
        });

        let statement = parse_timeseries(&body, StatementKind::BalanceSheet);
        assert_eq!(statement.get(LineItem::TotalAssets).map(|m| m.len()), Some(2));
        assert_eq!(statement.get(LineItem::NetPpe).map(|m| m.len()), Some(1));
        assert!(statement.get(LineItem::TotalRevenue).is_none());
    }

    #[tokio::test]
    async fn test_security_info() {
        let server = MockServer::start().await;
        mount_session(&server).await;
        Mock::given(method("GET"))
            .and(path("/v10/finance/quoteSummary/SPY"))
            .and(query_param("crumb", "Xyz123abc"))
            .and(query_param("formatted", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "quoteSummary": {"result": [{
                    "quoteType": {"quoteType": "ETF", "symbol": "SPY", "longName": "SPDR S&P 500 ETF Trust"},
                    "summaryDetail": {"totalAssets": {"raw": 5.0e11, "fmt": "500B"}, "navPrice": 512.3},
                }], "error": null}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let info = client.security_info("SPY").await.unwrap().unwrap();

        assert_eq!(info.kind(), SecurityKind::Etf);
        assert_eq!(info.total_assets, Some(500_000_000_000));
        assert_eq!(info.value(Attribute::NavPrice), json!(512.3));
    }

    #[tokio::test]
    async fn test_security_info_unknown_symbol() {
        let server = MockServer::start().await;
        mount_session(&server).await;
        Mock::given(method("GET"))
            .and(path("/v10/finance/quoteSummary/NOPE"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "quoteSummary": {"result": null, "error": {"code": "Not Found"}}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(client.security_info("NOPE").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rate_limited_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/finance/search"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.search("apple", 1, 0).await.unwrap_err();
        assert!(matches!(err, StockError::RateLimitExceeded { .. }));
    }

    #[tokio::test]
    async fn test_search() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/finance/search"))
            .and(query_param("q", "apple"))
            .and(query_param("quotesCount", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "quotes": [{"symbol": "AAPL", "shortname": "Apple Inc."}],
                "news": [],
                "researchReports": [{"id": "r1"}],
                "count": 1
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let results = client.search("apple", 1, 0).await.unwrap();
        assert_eq!(results.first_symbol(), Some("AAPL"));
        assert_eq!(results.research.len(), 1);
        assert!(results.lists.is_empty());
    }

    #[tokio::test]
    async fn test_news_filters_adverts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/xhr/ncp"))
            .and(query_param("queryRef", "latestNews"))
            .and(body_partial_json(json!({"serviceConfig": {"s": ["AAPL"]}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"tickerStream": {"stream": [
                    {"id": "1", "content": {"title": "one"}},
                    {"id": "2", "ad": [{"x": 1}], "content": {"title": "sponsored"}},
                    {"id": "3", "ad": [], "content": {"title": "three"}}
                ]}}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let news = client.news("AAPL", 10).await.unwrap();
        let ids: Vec<&str> = news.iter().filter_map(|n| n["id"].as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[tokio::test]
    async fn test_financial_statement_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ws/fundamentals-timeseries/v1/finance/timeseries/AAPL"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "timeseries": {"result": [{"meta": {"type": ["annualFreeCashFlow"]}}]}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let statement = client
            .financial_statement("AAPL", StatementKind::CashFlow)
            .await
            .unwrap();
        assert!(statement.is_none());
    }

    #[tokio::test]
    async fn test_recommendations_and_targets() {
        let server = MockServer::start().await;
        mount_session(&server).await;
        Mock::given(method("GET"))
            .and(path("/v10/finance/quoteSummary/MSFT"))
            .and(query_param("modules", "recommendationTrend"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "quoteSummary": {"result": [{"recommendationTrend": {"trend": [
                    {"period": "0m", "strongBuy": 12, "buy": 30, "hold": 5, "sell": 0, "strongSell": 0},
                    {"period": "-1m", "strongBuy": 11, "buy": 31, "hold": 5, "sell": 1, "strongSell": 0}
                ]}}]}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v10/finance/quoteSummary/MSFT"))
            .and(query_param("modules", "financialData"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "quoteSummary": {"result": [{"financialData": {
                    "currentPrice": 420.5, "targetHighPrice": 600.0, "targetLowPrice": 380.0,
                    "targetMeanPrice": 490.1, "targetMedianPrice": 500.0
                }}]}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;

        let trend = client.recommendations("MSFT").await.unwrap();
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].period, "0m");

        let targets = client.analyst_price_targets("MSFT").await.unwrap().unwrap();
        assert_eq!(targets.median, Some(500.0));
        assert_eq!(targets.current, Some(420.5));
    }

    #[tokio::test]
    async fn test_market_summary() {
        let server = MockServer::start().await;
        mount_session(&server).await;
        Mock::given(method("GET"))
            .and(path("/v6/finance/quote/marketSummary"))
            .and(query_param("market", "US"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "marketSummaryResponse": {"result": [
                    {"exchange": "SNP", "shortName": "S&P 500", "regularMarketPrice": 5000.1},
                    {"exchange": "DJI", "shortName": "Dow 30"}
                ]}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let summary = client.market_summary("US").await.unwrap();
        assert_eq!(summary.len(), 2);
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_live_price_history() {
        let client = YahooFinanceClient::new(&StockConfig::default()).unwrap();
        let bars = client
            .price_history("AAPL", Period::OneMonth, Interval::OneDay)
            .await
            .unwrap();
        assert!(!bars.is_empty());
        assert!(bars.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_live_security_info() {
        let client = YahooFinanceClient::new(&StockConfig::default()).unwrap();
        let info = client.security_info("AAPL").await.unwrap();
        assert!(info.is_some_and(|info| info.symbol.is_some()));
    }
}
