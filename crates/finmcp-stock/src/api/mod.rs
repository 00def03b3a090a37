//! API clients for stock data providers

pub mod provider;
pub mod yahoo;

pub use provider::MarketDataProvider;
#[cfg(test)]
pub use provider::MockMarketDataProvider;
pub use yahoo::YahooFinanceClient;
