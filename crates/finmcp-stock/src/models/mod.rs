//! Typed records returned by market data providers

pub mod bars;
pub mod info;
pub mod market;
pub mod statements;

pub use bars::{Interval, Period, PriceBar};
pub use info::{Attribute, AttributeGroup, SecurityInfo, SecurityKind};
pub use market::{AnalystPriceTargets, NewsItem, RecommendationTrend, SearchResults};
pub use statements::{FinancialStatement, LineItem, StatementKind};
