//! ATR (Average True Range) indicator

use crate::indicators::RollingMean;
use crate::models::Bar;

/// True range: max(high - low, |high - prev_close|, |low - prev_close|).
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    (high - low)
        .max((high - prev_close).abs())
        .max((low - prev_close).abs())
}

/// Incremental ATR as a simple rolling mean of true range.
///
/// True range needs a previous close, so the first bar only seeds state and
/// ATR is undefined for the first `window` bars.
#[derive(Debug, Clone)]
pub struct AtrState {
    prev_close: Option<f64>,
    ranges: RollingMean,
}

impl AtrState {
    pub fn new(window: usize) -> Self {
        Self {
            prev_close: None,
            ranges: RollingMean::new(window),
        }
    }

    pub fn update(&mut self, bar: &Bar) -> Option<f64> {
        let prev_close = self.prev_close.replace(bar.close)?;
        self.ranges
            .push(true_range(bar.high, bar.low, prev_close))
            .map(|atr| atr.max(0.0))
    }
}

/// ATR at the last bar, recomputed from the trailing `period` true ranges.
pub fn calculate_atr(bars: &[Bar], period: usize) -> Option<f64> {
    if period == 0 || bars.len() < period + 1 {
        return None;
    }

    let tail = &bars[bars.len() - (period + 1)..];
    let total: f64 = tail
        .windows(2)
        .map(|pair| true_range(pair[1].high, pair[1].low, pair[0].close))
        .sum();

    Some(total / period as f64)
}
