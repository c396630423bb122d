use serde::{Deserialize, Serialize};

/// Indicator values at one bar.
///
/// `rsi` and `atr` stay `None` until their windows fill; MACD and its
/// signal line are defined from the first bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atr: Option<f64>,
    pub macd: f64,
    pub macd_signal: f64,
}

impl IndicatorSnapshot {
    pub fn histogram(&self) -> f64 {
        self.macd - self.macd_signal
    }
}
