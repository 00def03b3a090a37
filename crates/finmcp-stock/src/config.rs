//! Configuration for stock data operations

use crate::error::{Result, StockError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Default Yahoo query host used for quote summaries and crumbs
pub const DEFAULT_QUERY1_URL: &str = "https://query1.finance.yahoo.com";
/// Default Yahoo query host used for search and fundamentals
pub const DEFAULT_QUERY2_URL: &str = "https://query2.finance.yahoo.com";
/// Default Yahoo site root, used for the news feed
pub const DEFAULT_ROOT_URL: &str = "https://finance.yahoo.com";
/// Endpoint that hands out the session cookie the crumb is tied to
pub const DEFAULT_COOKIE_URL: &str = "https://fc.yahoo.com";

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Base URLs of the Yahoo Finance endpoints
///
/// Overridable so tests can point the client at a mock server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YahooEndpoints {
    pub query1: String,
    pub query2: String,
    pub root: String,
    pub cookie: String,
}

impl Default for YahooEndpoints {
    fn default() -> Self {
        Self {
            query1: DEFAULT_QUERY1_URL.to_string(),
            query2: DEFAULT_QUERY2_URL.to_string(),
            root: DEFAULT_ROOT_URL.to_string(),
            cookie: DEFAULT_COOKIE_URL.to_string(),
        }
    }
}

impl YahooEndpoints {
    /// Point every endpoint at the same base URL
    pub fn single(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            query1: base.clone(),
            query2: base.clone(),
            root: base.clone(),
            cookie: base,
        }
    }

    fn validate(&self) -> Result<()> {
        for raw in [&self.query1, &self.query2, &self.root, &self.cookie] {
            let url = Url::parse(raw)?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(StockError::ConfigError(format!(
                    "unsupported scheme in {raw}"
                )));
            }
        }
        Ok(())
    }
}

/// Configuration for stock data operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockConfig {
    /// Request timeout duration
    pub request_timeout: Duration,

    /// Maximum provider requests per minute
    pub rate_limit_per_minute: u32,

    /// Number of news items requested per symbol
    pub news_count: usize,

    /// Maximum quotes returned by `search`
    pub search_max_results: usize,

    /// Maximum news items returned by `search`
    pub search_news_count: usize,

    /// Periods shown by the recommendations table
    pub recommendations_limit: usize,

    /// User agent sent with every request
    pub user_agent: String,

    /// Yahoo endpoint base URLs
    pub endpoints: YahooEndpoints,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            rate_limit_per_minute: 120,
            news_count: 10,
            search_max_results: 8,
            search_news_count: 8,
            recommendations_limit: 20,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            endpoints: YahooEndpoints::default(),
        }
    }
}

impl StockConfig {
    /// Create a new configuration builder
    pub fn builder() -> StockConfigBuilder {
        StockConfigBuilder::default()
    }

    /// Build a configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::builder()
            .with_env_lookup(|key| std::env::var(key).ok())?
            .build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.rate_limit_per_minute == 0 {
            return Err(StockError::ConfigError(
                "rate_limit_per_minute must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(StockError::ConfigError(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        if self.search_max_results == 0 {
            return Err(StockError::ConfigError(
                "search_max_results must be greater than 0".to_string(),
            ));
        }

        self.endpoints.validate()
    }
}

/// Builder for StockConfig
#[derive(Debug, Default)]
pub struct StockConfigBuilder {
    request_timeout: Option<Duration>,
    rate_limit_per_minute: Option<u32>,
    news_count: Option<usize>,
    search_max_results: Option<usize>,
    search_news_count: Option<usize>,
    recommendations_limit: Option<usize>,
    user_agent: Option<String>,
    endpoints: Option<YahooEndpoints>,
}

impl StockConfigBuilder {
    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set provider requests per minute
    pub fn rate_limit_per_minute(mut self, limit: u32) -> Self {
        self.rate_limit_per_minute = Some(limit);
        self
    }

    /// Set number of news items fetched per symbol
    pub fn news_count(mut self, count: usize) -> Self {
        self.news_count = Some(count);
        self
    }

    /// Set maximum quotes returned by search
    pub fn search_max_results(mut self, count: usize) -> Self {
        self.search_max_results = Some(count);
        self
    }

    /// Set maximum news items returned by search
    pub fn search_news_count(mut self, count: usize) -> Self {
        self.search_news_count = Some(count);
        self
    }

    /// Set number of recommendation periods rendered
    pub fn recommendations_limit(mut self, count: usize) -> Self {
        self.recommendations_limit = Some(count);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set Yahoo endpoint base URLs
    pub fn endpoints(mut self, endpoints: YahooEndpoints) -> Self {
        self.endpoints = Some(endpoints);
        self
    }

    /// Apply `FINMCP_*` overrides read through `lookup`
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(secs) = parse_var::<u64>(&lookup, "FINMCP_REQUEST_TIMEOUT_SECS")? {
            self.request_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(limit) = parse_var(&lookup, "FINMCP_RATE_LIMIT_PER_MINUTE")? {
            self.rate_limit_per_minute = Some(limit);
        }
        if let Some(count) = parse_var(&lookup, "FINMCP_NEWS_COUNT")? {
            self.news_count = Some(count);
        }
        if let Some(count) = parse_var(&lookup, "FINMCP_SEARCH_MAX_RESULTS")? {
            self.search_max_results = Some(count);
        }
        if let Some(agent) = lookup("FINMCP_USER_AGENT") {
            self.user_agent = Some(agent);
        }

        let mut endpoints = self.endpoints.take().unwrap_or_default();
        if let Some(url) = lookup("FINMCP_YAHOO_QUERY1_URL") {
            endpoints.query1 = url;
        }
        if let Some(url) = lookup("FINMCP_YAHOO_QUERY2_URL") {
            endpoints.query2 = url;
        }
        if let Some(url) = lookup("FINMCP_YAHOO_ROOT_URL") {
            endpoints.root = url;
        }
        if let Some(url) = lookup("FINMCP_YAHOO_COOKIE_URL") {
            endpoints.cookie = url;
        }
        self.endpoints = Some(endpoints);

        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> Result<StockConfig> {
        let defaults = StockConfig::default();

        let config = StockConfig {
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            rate_limit_per_minute: self
                .rate_limit_per_minute
                .unwrap_or(defaults.rate_limit_per_minute),
            news_count: self.news_count.unwrap_or(defaults.news_count),
            search_max_results: self.search_max_results.unwrap_or(defaults.search_max_results),
            search_news_count: self.search_news_count.unwrap_or(defaults.search_news_count),
            recommendations_limit: self
                .recommendations_limit
                .unwrap_or(defaults.recommendations_limit),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
            endpoints: self.endpoints.unwrap_or(defaults.endpoints),
        };

        config.validate()?;
        Ok(config)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| StockError::ConfigError(format!("{key}={raw:?}: {e}")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = StockConfig::default();
        assert_eq!(config.news_count, 10);
        assert_eq!(config.search_max_results, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = StockConfig::builder()
            .rate_limit_per_minute(30)
            .request_timeout(Duration::from_secs(60))
            .news_count(5)
            .build()
            .unwrap();

        assert_eq!(config.rate_limit_per_minute, 30);
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.news_count, 5);
    }

    #[test]
    fn test_validation_zero_rate_limit() {
        let config = StockConfig {
            rate_limit_per_minute: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_bad_endpoint() {
        let result = StockConfig::builder()
            .endpoints(YahooEndpoints::single("not a url"))
            .build();
        assert!(matches!(result, Err(StockError::ConfigError(_))));

        let result = StockConfig::builder()
            .endpoints(YahooEndpoints::single("ftp://example.com"))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_env_overrides() {
        let config = StockConfig::builder()
            .with_env_lookup(lookup_from(&[
                ("FINMCP_REQUEST_TIMEOUT_SECS", "5"),
                ("FINMCP_NEWS_COUNT", "3"),
                ("FINMCP_YAHOO_QUERY2_URL", "http://127.0.0.1:9000"),
            ]))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.news_count, 3);
        assert_eq!(config.endpoints.query2, "http://127.0.0.1:9000");
        assert_eq!(config.endpoints.query1, DEFAULT_QUERY1_URL);
    }

    #[test]
    fn test_env_override_unparseable() {
        let result = StockConfig::builder()
            .with_env_lookup(lookup_from(&[("FINMCP_RATE_LIMIT_PER_MINUTE", "lots")]));
        assert!(matches!(result, Err(StockError::ConfigError(msg)) if msg.contains("FINMCP_RATE_LIMIT_PER_MINUTE")));
    }
}
