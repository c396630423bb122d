//! Unit tests for ATR indicator

use chrono::{DateTime, Utc};
use momentum_watch::indicators::volatility::{calculate_atr, true_range, AtrState};
use momentum_watch::models::Bar;

fn bar(i: usize, high: f64, low: f64, close: f64) -> Bar {
    let ts = DateTime::<Utc>::from_timestamp(1_700_000_000 + i as i64 * 60, 0).unwrap();
    Bar::new(ts, close, high, low, close)
}

fn noisy_bars(count: usize, seed: u64) -> Vec<Bar> {
    let mut state = seed;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (state >> 33) as f64 / (1u64 << 31) as f64
    };
    let mut close = 100.0;
    (0..count)
        .map(|i| {
            close = (close + (next() - 0.5) * 4.0).max(1.0);
            let high = close + next() * 2.0;
            let low = (close - next() * 2.0).max(0.5);
            bar(i, high, low, close)
        })
        .collect()
}

#[test]
fn test_true_range_uses_gap_from_previous_close() {
    assert_eq!(true_range(11.0, 10.0, 10.5), 1.0);
    // Gap up: high - prev_close dominates
    assert_eq!(true_range(15.0, 14.0, 10.0), 5.0);
    // Gap down: |low - prev_close| dominates
    assert_eq!(true_range(8.0, 7.0, 10.0), 3.0);
}

#[test]
fn test_atr_undefined_for_first_window_bars() {
    let bars = vec![
        bar(0, 11.0, 9.0, 10.0),
        bar(1, 12.0, 10.0, 11.0),
        bar(2, 12.0, 11.0, 11.5),
        bar(3, 13.0, 11.0, 12.0),
    ];
    let mut atr = AtrState::new(3);
    let values: Vec<Option<f64>> = bars.iter().map(|b| atr.update(b)).collect();

    assert_eq!(&values[..3], &[None, None, None]);
    // True ranges: 2.0, 1.0, 2.0
    assert!((values[3].unwrap() - 5.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_atr_non_negative_and_matches_full_recompute() {
    let bars = noisy_bars(250, 99);
    let mut atr = AtrState::new(14);

    for i in 0..bars.len() {
        let incremental = atr.update(&bars[i]);
        let reference = calculate_atr(&bars[..=i], 14);
        match (incremental, reference) {
            (Some(a), Some(b)) => {
                assert!(a >= 0.0);
                assert!((a - b).abs() < 1e-9, "bar {}: {} vs {}", i, a, b);
            }
            (None, None) => {}
            other => panic!("bar {}: definedness differs: {:?}", i, other),
        }
    }
}
