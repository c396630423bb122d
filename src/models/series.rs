//! Append-only, timestamp-ordered bar storage.

use crate::error::SeriesError;
use crate::models::Bar;

/// Ordered sequence of bars, strictly ascending by timestamp.
///
/// Never truncates; retention is the caller's concern.
#[derive(Debug, Clone, Default)]
pub struct PriceSeries {
    bars: Vec<Bar>,
}

impl PriceSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bar. Fails without mutating if `bar` is not newer than the last bar.
    pub fn append(&mut self, bar: Bar) -> Result<(), SeriesError> {
        if let Some(last) = self.bars.last() {
            if bar.timestamp <= last.timestamp {
                return Err(SeriesError::OutOfOrder {
                    last: last.timestamp,
                    attempted: bar.timestamp,
                });
            }
        }
        self.bars.push(bar);
        Ok(())
    }

    /// The most recent `n` bars (fewer if history is shorter), oldest first.
    pub fn last_n(&self, n: usize) -> &[Bar] {
        let start = self.bars.len().saturating_sub(n);
        &self.bars[start..]
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bar> {
        self.bars.iter()
    }

    pub fn as_slice(&self) -> &[Bar] {
        &self.bars
    }
}
