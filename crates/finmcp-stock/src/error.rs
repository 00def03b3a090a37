//! Error types for stock data operations

use thiserror::Error;

/// Stock data specific errors
#[derive(Debug, Error)]
pub enum StockError {
    /// API request failed
    #[error("API error: {0}")]
    ApiError(String),

    /// Invalid stock symbol provided
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// A scalar argument (period, interval, search type) was not recognised
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Rate limit exceeded for API
    #[error("Rate limit exceeded for {provider}")]
    RateLimitExceeded { provider: String },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinanceError(String),

    /// Technical indicator calculation error
    #[error("Technical indicator error: {0}")]
    IndicatorError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for stock operations
pub type Result<T> = std::result::Result<T, StockError>;

/// Convert StockError to finmcp_core::Error
impl From<StockError> for finmcp_core::Error {
    fn from(err: StockError) -> Self {
        match err {
            StockError::InvalidArgument(msg) | StockError::InvalidSymbol(msg) => {
                finmcp_core::Error::InvalidParams(msg)
            }
            other => finmcp_core::Error::ProcessingFailed(other.to_string()),
        }
    }
}

impl From<ta::errors::TaError> for StockError {
    fn from(err: ta::errors::TaError) -> Self {
        StockError::IndicatorError(err.to_string())
    }
}

impl From<url::ParseError> for StockError {
    fn from(err: url::ParseError) -> Self {
        StockError::ConfigError(format!("invalid URL: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StockError::InvalidSymbol("INVALID".to_string());
        assert_eq!(err.to_string(), "Invalid symbol: INVALID");

        let err = StockError::RateLimitExceeded {
            provider: "Yahoo Finance".to_string(),
        };
        assert_eq!(err.to_string(), "Rate limit exceeded for Yahoo Finance");
    }

    #[test]
    fn test_error_conversion() {
        let stock_err = StockError::ApiError("Test error".to_string());
        let core_err: finmcp_core::Error = stock_err.into();

        match core_err {
            finmcp_core::Error::ProcessingFailed(msg) => {
                assert!(msg.contains("API error"));
            }
            _ => panic!("Expected ProcessingFailed variant"),
        }

        let core_err: finmcp_core::Error =
            StockError::InvalidArgument("period '2wk'".to_string()).into();
        assert!(matches!(core_err, finmcp_core::Error::InvalidParams(_)));
    }
}
