//! RSI (Relative Strength Index) indicator

use crate::indicators::RollingMean;
use crate::models::Bar;

/// Convert average gain / average loss into RSI.
///
/// RSI = 100 - (100 / (1 + RS)), RS = Average Gain / Average Loss.
/// Zero average loss saturates to 100 when there was any gain; 0/0 carries
/// no delta information and yields `None`.
pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss <= 0.0 {
        return if avg_gain > 0.0 { Some(100.0) } else { None };
    }

    let rs = avg_gain / avg_loss;
    Some((100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0))
}

/// Incremental RSI using simple rolling means of gains and losses.
///
/// Undefined for the first `window` bars.
#[derive(Debug, Clone)]
pub struct RsiState {
    prev_close: Option<f64>,
    gains: RollingMean,
    losses: RollingMean,
}

impl RsiState {
    pub fn new(window: usize) -> Self {
        Self {
            prev_close: None,
            gains: RollingMean::new(window),
            losses: RollingMean::new(window),
        }
    }

    pub fn update(&mut self, close: f64) -> Option<f64> {
        let prev = self.prev_close.replace(close)?;
        let delta = close - prev;

        let avg_gain = self.gains.push(delta.max(0.0));
        let avg_loss = self.losses.push((-delta).max(0.0));

        rsi_from_averages(avg_gain?, avg_loss?)
    }
}

/// RSI at the last bar, recomputed from the trailing `period` deltas.
pub fn calculate_rsi(bars: &[Bar], period: usize) -> Option<f64> {
    if period == 0 || bars.len() < period + 1 {
        return None;
    }

    let tail = &bars[bars.len() - (period + 1)..];
    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    for pair in tail.windows(2) {
        let change = pair[1].close - pair[0].close;
        if change > 0.0 {
            gain_sum += change;
        } else {
            loss_sum += -change;
        }
    }

    rsi_from_averages(gain_sum / period as f64, loss_sum / period as f64)
}
