//! Fixed-window arithmetic mean updated in O(1) per value.

use std::collections::VecDeque;

/// Simple moving average over the last `window` values.
///
/// Each push adds the entering value and subtracts the leaving one. When
/// every value in the window is zero the running sum is reset to exactly
/// zero so accumulated rounding never turns "no movement" into a tiny
/// non-zero mean.
#[derive(Debug, Clone)]
pub struct RollingMean {
    window: usize,
    values: VecDeque<f64>,
    sum: f64,
    nonzero: usize,
}

impl RollingMean {
    /// `window` must be at least 1.
    pub fn new(window: usize) -> Self {
        Self {
            window,
            values: VecDeque::with_capacity(window + 1),
            sum: 0.0,
            nonzero: 0,
        }
    }

    /// Push a value and return the mean once the window is full.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        if self.values.len() == self.window {
            if let Some(leaving) = self.values.pop_front() {
                self.sum -= leaving;
                if leaving != 0.0 {
                    self.nonzero -= 1;
                }
            }
        }

        self.values.push_back(value);
        self.sum += value;
        if value != 0.0 {
            self.nonzero += 1;
        }
        if self.nonzero == 0 {
            self.sum = 0.0;
        }

        self.mean()
    }

    pub fn mean(&self) -> Option<f64> {
        if self.is_full() {
            Some(self.sum / self.window as f64)
        } else {
            None
        }
    }

    pub fn is_full(&self) -> bool {
        self.window > 0 && self.values.len() == self.window
    }

    pub fn window(&self) -> usize {
        self.window
    }
}
