//! Error taxonomy for the signal engine.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::services::market_data::ProviderError;

/// Bar ordering violations when appending to a [`crate::models::PriceSeries`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("bar at {attempted} is not after the last bar at {last}")]
    OutOfOrder {
        last: DateTime<Utc>,
        attempted: DateTime<Utc>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignalError {
    /// Fewer than two consecutive snapshots with a defined RSI.
    #[error("insufficient history: two snapshots with a defined RSI are required")]
    InsufficientHistory,
}

/// Invalid configuration. Raised at construction, never retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be at least 1")]
    ZeroWindow { name: &'static str },

    #[error("MACD fast span ({fast}) must be smaller than slow span ({slow})")]
    FastNotBelowSlow { fast: usize, slow: usize },

    #[error("poll interval must be a positive, representable number of seconds, got {0}")]
    NonPositiveInterval(f64),

    #[error("RSI thresholds must satisfy 0 < oversold ({oversold}) < overbought ({overbought}) < 100")]
    InvalidThresholds { oversold: f64, overbought: f64 },

    #[error("stock symbol cannot be empty")]
    EmptySymbol,

    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Failure of a single poll cycle. Downgraded to a status annotation by the runtime.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Series(#[from] SeriesError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("already monitoring {0}; stop or change symbol first")]
    AlreadyRunning(String),
}
