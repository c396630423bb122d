//! EMA (Exponential Moving Average) indicator

use crate::models::Bar;

/// Smoothing factor for a given span: `2 / (span + 1)`.
pub fn smoothing_factor(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

/// Recursive EMA seeded by the first value it sees.
///
/// `ema_0 = x_0`, `ema_t = a * x_t + (1 - a) * ema_{t-1}`.
#[derive(Debug, Clone)]
pub struct Ema {
    alpha: f64,
    value: Option<f64>,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        Self {
            alpha: smoothing_factor(span),
            value: None,
        }
    }

    pub fn update(&mut self, x: f64) -> f64 {
        let next = match self.value {
            Some(prev) => self.alpha * x + (1.0 - self.alpha) * prev,
            None => x,
        };
        self.value = Some(next);
        next
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }
}

/// EMA of the last value in `values`, computed from scratch as the
/// closed-form weighted sum of the whole sequence.
pub fn ema_of(values: &[f64], span: usize) -> Option<f64> {
    let (first, rest) = values.split_first()?;
    let alpha = smoothing_factor(span);
    let decay = 1.0 - alpha;
    let n = rest.len();

    let mut total = first * decay.powi(n as i32);
    for (i, x) in rest.iter().enumerate() {
        total += alpha * x * decay.powi((n - 1 - i) as i32);
    }
    Some(total)
}

/// EMA of closing prices at the last bar.
pub fn calculate_ema(bars: &[Bar], span: usize) -> Option<f64> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    ema_of(&closes, span)
}
