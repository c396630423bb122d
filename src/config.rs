//! Engine configuration and environment lookup.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

/// Get the deployment environment (`APP_ENV`), defaulting to `sandbox`.
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

/// Indicator windows, MACD spans, signal thresholds and polling cadence.
///
/// Passed explicitly into every engine constructor; nothing reads ambient
/// global state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub rsi_window: usize,
    pub atr_window: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub poll_interval_seconds: f64,
    /// Look-back requested when seeding history, e.g. `1d`.
    pub history_period: String,
    /// Bar width requested from the provider, e.g. `1m`.
    pub bar_interval: String,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rsi_window: 14,
            atr_window: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            poll_interval_seconds: DEFAULT_POLL_INTERVAL_SECS as f64,
            history_period: "1d".to_string(),
            bar_interval: "1m".to_string(),
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
        }
    }
}

impl EngineConfig {
    /// Build a configuration from environment variables, using defaults for unset keys.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            rsi_window: env_or("RSI_WINDOW", defaults.rsi_window)?,
            atr_window: env_or("ATR_WINDOW", defaults.atr_window)?,
            macd_fast: env_or("MACD_FAST", defaults.macd_fast)?,
            macd_slow: env_or("MACD_SLOW", defaults.macd_slow)?,
            macd_signal: env_or("MACD_SIGNAL", defaults.macd_signal)?,
            poll_interval_seconds: env_or("POLL_INTERVAL_SECONDS", defaults.poll_interval_seconds)?,
            history_period: env_or("HISTORY_PERIOD", defaults.history_period)?,
            bar_interval: env_or("BAR_INTERVAL", defaults.bar_interval)?,
            rsi_oversold: env_or("RSI_OVERSOLD", defaults.rsi_oversold)?,
            rsi_overbought: env_or("RSI_OVERBOUGHT", defaults.rsi_overbought)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject zero windows, `fast >= slow`, intervals that are not a positive
    /// representable duration, and inverted thresholds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("rsi_window", self.rsi_window),
            ("atr_window", self.atr_window),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroWindow { name });
            }
        }

        if self.macd_fast >= self.macd_slow {
            return Err(ConfigError::FastNotBelowSlow {
                fast: self.macd_fast,
                slow: self.macd_slow,
            });
        }

        if self.checked_poll_interval().is_none() {
            return Err(ConfigError::NonPositiveInterval(self.poll_interval_seconds));
        }

        let thresholds_ok = self.rsi_oversold > 0.0
            && self.rsi_oversold < self.rsi_overbought
            && self.rsi_overbought < 100.0;
        if !thresholds_ok {
            return Err(ConfigError::InvalidThresholds {
                oversold: self.rsi_oversold,
                overbought: self.rsi_overbought,
            });
        }

        Ok(())
    }

    /// Poll interval as a [`Duration`]. Falls back to the default when the
    /// configured value would not pass [`EngineConfig::validate`].
    pub fn poll_interval(&self) -> Duration {
        self.checked_poll_interval()
            .unwrap_or(Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS))
    }

    /// `None` for NaN, infinite, negative, overflowing or sub-nanosecond intervals.
    fn checked_poll_interval(&self) -> Option<Duration> {
        Duration::try_from_secs_f64(self.poll_interval_seconds)
            .ok()
            .filter(|interval| !interval.is_zero())
    }
}

fn env_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Trim and upper-case a ticker symbol, rejecting empty input.
pub fn normalize_symbol(symbol: &str) -> Result<String, ConfigError> {
    let symbol = symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(ConfigError::EmptySymbol);
    }
    Ok(symbol)
}
