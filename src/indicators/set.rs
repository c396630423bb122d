//! Combined RSI / ATR / MACD state producing one snapshot per bar.

use crate::config::EngineConfig;
use crate::indicators::momentum::{MacdState, RsiState};
use crate::indicators::volatility::AtrState;
use crate::models::{Bar, IndicatorSnapshot};

/// Rolling indicator state extended one bar at a time.
///
/// Each [`IndicatorSet::update`] is O(1) in history length: RSI and ATR keep
/// their windows, MACD is purely recursive.
#[derive(Debug, Clone)]
pub struct IndicatorSet {
    rsi: RsiState,
    atr: AtrState,
    macd: MacdState,
    snapshots: Vec<IndicatorSnapshot>,
}

impl IndicatorSet {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            rsi: RsiState::new(config.rsi_window),
            atr: AtrState::new(config.atr_window),
            macd: MacdState::new(config.macd_fast, config.macd_slow, config.macd_signal),
            snapshots: Vec::new(),
        }
    }

    /// Replay `bars` in order into a fresh set.
    pub fn from_bars<'a>(config: &EngineConfig, bars: impl IntoIterator<Item = &'a Bar>) -> Self {
        let mut set = Self::new(config);
        for bar in bars {
            set.update(bar);
        }
        set
    }

    /// Extend the state with the next bar and return its snapshot.
    pub fn update(&mut self, bar: &Bar) -> IndicatorSnapshot {
        let macd = self.macd.update(bar.close);
        let snapshot = IndicatorSnapshot {
            rsi: self.rsi.update(bar.close),
            atr: self.atr.update(bar),
            macd: macd.macd,
            macd_signal: macd.signal,
        };
        self.snapshots.push(snapshot);
        snapshot
    }

    pub fn latest(&self) -> Option<&IndicatorSnapshot> {
        self.snapshots.last()
    }

    /// `(previous, current)` once at least two bars have been processed.
    pub fn latest_pair(&self) -> Option<(&IndicatorSnapshot, &IndicatorSnapshot)> {
        match self.snapshots.as_slice() {
            [.., previous, current] => Some((previous, current)),
            _ => None,
        }
    }

    pub fn snapshots(&self) -> &[IndicatorSnapshot] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
