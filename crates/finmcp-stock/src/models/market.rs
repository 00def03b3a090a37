//! News, search and analyst records

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Projected news article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub summary: String,
    #[serde(rename = "pubDate")]
    pub pub_date: String,
}

impl NewsItem {
    pub const NO_TITLE: &'static str = "No title";
    pub const NO_SUMMARY: &'static str = "No summary";
    pub const NO_DATE: &'static str = "No date";

    /// Project a raw feed item
    ///
    /// Returns `None` unless the item is an object with an object `content`.
    pub fn from_raw(raw: &Value) -> Option<Self> {
        let content = raw.as_object()?.get("content")?.as_object()?;
        let text = |key: &str, placeholder: &str| {
            content
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or(placeholder)
                .to_string()
        };

        Some(Self {
            title: text("title", Self::NO_TITLE),
            summary: text("summary", Self::NO_SUMMARY),
            pub_date: text("pubDate", Self::NO_DATE),
        })
    }
}

/// Raw search response sections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub quotes: Vec<Value>,
    #[serde(default)]
    pub news: Vec<Value>,
    #[serde(default)]
    pub lists: Vec<Value>,
    #[serde(default, alias = "researchReports")]
    pub research: Vec<Value>,
}

impl SearchResults {
    /// Symbol of the best matching quote
    pub fn first_symbol(&self) -> Option<&str> {
        self.quotes
            .iter()
            .find_map(|quote| quote.get("symbol").and_then(Value::as_str))
    }

    /// Every section as one JSON object
    pub fn all(&self) -> Value {
        json!({
            "quotes": self.quotes,
            "news": self.news,
            "lists": self.lists,
            "research": self.research,
        })
    }
}

/// Analyst price targets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalystPriceTargets {
    pub current: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

impl AnalystPriceTargets {
    pub fn is_empty(&self) -> bool {
        self.current.is_none()
            && self.high.is_none()
            && self.low.is_none()
            && self.mean.is_none()
            && self.median.is_none()
    }
}

/// Analyst rating counts for one period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationTrend {
    /// Relative period, `0m` is the current month
    pub period: String,
    #[serde(default)]
    pub strong_buy: i64,
    #[serde(default)]
    pub buy: i64,
    #[serde(default)]
    pub hold: i64,
    #[serde(default)]
    pub sell: i64,
    #[serde(default)]
    pub strong_sell: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_news_projection_placeholders() {
        let item = NewsItem::from_raw(&json!({
            "id": "abc",
            "content": {"title": "Apple beats estimates", "pubDate": "2024-05-02T20:30:00Z"}
        }))
        .unwrap();

        assert_eq!(item.title, "Apple beats estimates");
        assert_eq!(item.summary, NewsItem::NO_SUMMARY);
        assert_eq!(item.pub_date, "2024-05-02T20:30:00Z");

        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("pubDate").is_some());
    }

    #[test]
    fn test_news_projection_skips_malformed() {
        assert!(NewsItem::from_raw(&json!({"title": "flat"})).is_none());
        assert!(NewsItem::from_raw(&json!({"content": "text"})).is_none());
        assert!(NewsItem::from_raw(&json!("string")).is_none());
    }

    #[test]
    fn test_search_first_symbol() {
        let results = SearchResults {
            quotes: vec![json!({"exchange": "NMS"}), json!({"symbol": "AAPL"})],
            ..Default::default()
        };
        assert_eq!(results.first_symbol(), Some("AAPL"));
        assert_eq!(SearchResults::default().first_symbol(), None);
        assert_eq!(results.all()["quotes"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_recommendation_trend_deserialize() {
        let trend: RecommendationTrend = serde_json::from_value(json!({
            "period": "-1m", "strongBuy": 11, "buy": 21, "hold": 6, "sell": 0, "strongSell": 1
        }))
        .unwrap();
        assert_eq!(trend.strong_buy, 11);
        assert_eq!(trend.strong_sell, 1);
    }
}
