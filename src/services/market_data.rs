//! Market data provider interface.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Bar;

/// Transient data-source failure. Retried on the next scheduled tick.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("unexpected HTTP status {status} for {symbol}")]
    Status { symbol: String, status: u16 },

    #[error("provider error [{code}]: {description}")]
    Api { code: String, description: String },

    #[error("unknown symbol {0}")]
    UnknownSymbol(String),

    #[error("malformed response: {0}")]
    Parse(String),
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Most recent bar for `symbol`, or `None` when the source has nothing.
    async fn fetch_latest_bar(&self, symbol: &str) -> Result<Option<Bar>, ProviderError>;

    /// Bars covering `period` (e.g. `1d`, `6mo`), oldest first. May be empty.
    async fn fetch_history(&self, symbol: &str, period: &str) -> Result<Vec<Bar>, ProviderError>;
}
