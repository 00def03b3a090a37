//! Response assembly: provider data in, tool text out
//!
//! Every function here returns `Ok` with the text to hand back to the caller,
//! including the fixed messages for empty results. `Err` means the provider
//! or a decoder failed; the tool layer turns it into an error message.

pub mod lookup;
pub mod market;
pub mod news;
pub mod price_history;
pub mod recommendations;
pub mod search;
pub mod security_info;

pub use lookup::{lookup_report, lookup_symbol};
pub use market::market_summary_report;
pub use news::{news_report, project_news};
pub use price_history::{build_price_table, price_history_report};
pub use recommendations::recommendations_report;
pub use search::{SearchType, search_report};
pub use security_info::{EQUITY_GROUPS, FUND_GROUPS, SubRecord, security_info_report};

/// Returned when a price history request yields no bars
pub const NO_DATA: &str = "No data available.";
