//! Stock market data tools
//!
//! This crate turns Yahoo Finance data into the text answers served by the
//! MCP tools:
//!
//! - Price history with RSI, MACD, Bollinger Bands and rolling
//!   support/resistance, rendered as a markdown table
//! - Security information grouped by theme, with fund and equity layouts
//! - Financial statement excerpts and analyst price targets
//! - News, search, symbol lookup, recommendation trends and the market summary
//!
//! # Architecture
//!
//! ```text
//! tools::*  ->  report::*  ->  MarketDataProvider  (YahooFinanceClient)
//!                  |
//!                  +-> analysis::{indicators, rolling, table}
//! ```
//!
//! Data access sits behind the [`MarketDataProvider`] trait so the report
//! assemblers can be exercised against mocks.
//!
//! # Example
//!
//! ```rust,ignore
//! use finmcp_stock::{StockConfig, YahooFinanceClient, tools};
//! use finmcp_tools::ToolRegistry;
//! use std::sync::Arc;
//!
//! let config = Arc::new(StockConfig::from_env()?);
//! let provider = Arc::new(YahooFinanceClient::new(&config)?);
//! let registry = ToolRegistry::new();
//! tools::register_all(&registry, provider, config);
//! ```

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod tools;

pub use api::{MarketDataProvider, YahooFinanceClient};
pub use config::{StockConfig, YahooEndpoints};
pub use error::{Result, StockError};
pub use tools::register_all;
