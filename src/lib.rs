//! Momentum Watch
//!
//! Polls market data for a ticker symbol and derives BUY / SELL / NONE
//! signals from RSI, ATR and MACD computed incrementally over the bars.

pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod services;
pub mod signals;

pub use config::EngineConfig;
pub use crate::core::runtime::Monitor;
pub use error::{ConfigError, EngineError, MonitorError, SeriesError, SignalError};
pub use models::{Bar, IndicatorSnapshot, PriceSeries, RiskLevel, Signal, StatusReport};
