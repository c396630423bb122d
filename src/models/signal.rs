use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Discrete trading signal derived from two consecutive snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
    #[default]
    None,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::None => "NONE",
        };
        f.write_str(label)
    }
}

/// Latest ATR, or unknown while the ATR window is still filling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "atr", rename_all = "lowercase")]
pub enum RiskLevel {
    Known(f64),
    #[default]
    Unknown,
}

impl RiskLevel {
    pub fn from_atr(atr: Option<f64>) -> Self {
        match atr {
            Some(value) if value.is_finite() => RiskLevel::Known(value),
            _ => RiskLevel::Unknown,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            RiskLevel::Known(value) => Some(*value),
            RiskLevel::Unknown => None,
        }
    }

    /// ATR as a percentage of `price`.
    pub fn percent_of(&self, price: f64) -> Option<f64> {
        match self {
            RiskLevel::Known(atr) if price > 0.0 => Some(atr / price * 100.0),
            _ => None,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Known(atr) => write!(f, "{:.4}", atr),
            RiskLevel::Unknown => f.write_str("unknown"),
        }
    }
}

/// Read-only status record emitted once per completed poll cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
    pub risk_level: RiskLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level_percent: Option<f64>,
    pub signal: Signal,
    pub bars: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl StatusReport {
    /// Status before any data has been received for `symbol`.
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            current_price: None,
            risk_level: RiskLevel::Unknown,
            risk_level_percent: None,
            signal: Signal::None,
            bars: 0,
            error_message: None,
            updated_at: Utc::now(),
        }
    }

    /// Keep the last good values and annotate them with `message`.
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self.updated_at = Utc::now();
        self
    }

    pub fn is_error(&self) -> bool {
        self.error_message.is_some()
    }
}
