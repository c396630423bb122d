//! MACD (Moving Average Convergence Divergence) indicator

use serde::{Deserialize, Serialize};

use crate::indicators::trend::{ema_of, Ema};
use crate::models::Bar;

/// MACD line and its signal line at one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdLine {
    pub macd: f64,
    pub signal: f64,
}

impl MacdLine {
    pub fn histogram(&self) -> f64 {
        self.macd - self.signal
    }
}

/// Incremental MACD.
///
/// MACD = EMA(fast) - EMA(slow) of close; Signal = EMA(signal) of MACD.
/// All three EMAs are seeded by their first input, so values exist from bar 0.
#[derive(Debug, Clone)]
pub struct MacdState {
    fast: Ema,
    slow: Ema,
    signal: Ema,
}

impl MacdState {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        Self {
            fast: Ema::new(fast),
            slow: Ema::new(slow),
            signal: Ema::new(signal),
        }
    }

    pub fn update(&mut self, close: f64) -> MacdLine {
        let macd = self.fast.update(close) - self.slow.update(close);
        let signal = self.signal.update(macd);
        MacdLine { macd, signal }
    }
}

/// MACD at the last bar, recomputed over the whole slice without recursion.
pub fn calculate_macd(
    bars: &[Bar],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Option<MacdLine> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

    let mut macd_values = Vec::with_capacity(closes.len());
    for end in 1..=closes.len() {
        let prefix = &closes[..end];
        macd_values.push(ema_of(prefix, fast_period)? - ema_of(prefix, slow_period)?);
    }

    let macd = *macd_values.last()?;
    let signal = ema_of(&macd_values, signal_period)?;
    Some(MacdLine { macd, signal })
}
