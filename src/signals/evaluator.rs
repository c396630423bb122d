//! RSI threshold crossing confirmed by MACD position.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::SignalError;
use crate::indicators::IndicatorSet;
use crate::models::{IndicatorSnapshot, Signal};

/// RSI levels that define oversold / overbought.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalThresholds {
    pub oversold: f64,
    pub overbought: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            oversold: 30.0,
            overbought: 70.0,
        }
    }
}

impl From<&EngineConfig> for SignalThresholds {
    fn from(config: &EngineConfig) -> Self {
        Self {
            oversold: config.rsi_oversold,
            overbought: config.rsi_overbought,
        }
    }
}

/// Pure function of two consecutive snapshots; holds no state between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalEvaluator {
    thresholds: SignalThresholds,
}

impl SignalEvaluator {
    pub fn new(thresholds: SignalThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> SignalThresholds {
        self.thresholds
    }

    /// Rules, first match wins:
    /// 1. BUY: RSI falls below oversold this bar and MACD is above its signal line.
    /// 2. SELL: RSI rises above overbought this bar and MACD is below its signal line.
    /// 3. NONE otherwise.
    pub fn evaluate(
        &self,
        previous: &IndicatorSnapshot,
        current: &IndicatorSnapshot,
    ) -> Result<Signal, SignalError> {
        let (Some(prev_rsi), Some(rsi)) = (previous.rsi, current.rsi) else {
            return Err(SignalError::InsufficientHistory);
        };
        let SignalThresholds {
            oversold,
            overbought,
        } = self.thresholds;

        if rsi < oversold && prev_rsi >= oversold && current.macd > current.macd_signal {
            Ok(Signal::Buy)
        } else if rsi > overbought && prev_rsi <= overbought && current.macd < current.macd_signal {
            Ok(Signal::Sell)
        } else {
            Ok(Signal::None)
        }
    }

    /// Evaluate the two most recent snapshots of `set`.
    pub fn evaluate_latest(&self, set: &IndicatorSet) -> Result<Signal, SignalError> {
        let (previous, current) = set.latest_pair().ok_or(SignalError::InsufficientHistory)?;
        self.evaluate(previous, current)
    }
}
