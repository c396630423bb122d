//! Unit tests for the signal evaluator

use momentum_watch::models::{IndicatorSnapshot, Signal};
use momentum_watch::signals::{SignalEvaluator, SignalThresholds};
use momentum_watch::SignalError;

fn snap(rsi: Option<f64>, macd: f64, macd_signal: f64) -> IndicatorSnapshot {
    IndicatorSnapshot {
        rsi,
        atr: Some(1.0),
        macd,
        macd_signal,
    }
}

#[test]
fn test_buy_on_rsi_cross_below_oversold_with_macd_above_signal() {
    let evaluator = SignalEvaluator::default();
    let previous = snap(Some(31.0), 0.1, 0.0);
    let current = snap(Some(28.0), 0.2, 0.1);
    assert_eq!(evaluator.evaluate(&previous, &current), Ok(Signal::Buy));
}

#[test]
fn test_buy_boundary_previous_exactly_oversold() {
    let evaluator = SignalEvaluator::default();
    let previous = snap(Some(30.0), 0.0, 0.0);
    let current = snap(Some(29.9), 0.2, 0.1);
    assert_eq!(evaluator.evaluate(&previous, &current), Ok(Signal::Buy));
}

#[test]
fn test_no_buy_without_macd_confirmation() {
    let evaluator = SignalEvaluator::default();
    let previous = snap(Some(31.0), 0.0, 0.0);
    assert_eq!(
        evaluator.evaluate(&previous, &snap(Some(28.0), 0.1, 0.2)),
        Ok(Signal::None)
    );
    assert_eq!(
        evaluator.evaluate(&previous, &snap(Some(28.0), 0.1, 0.1)),
        Ok(Signal::None)
    );
}

#[test]
fn test_no_buy_when_already_oversold() {
    let evaluator = SignalEvaluator::default();
    let previous = snap(Some(29.0), 0.0, 0.0);
    let current = snap(Some(25.0), 0.2, 0.1);
    assert_eq!(evaluator.evaluate(&previous, &current), Ok(Signal::None));
}

#[test]
fn test_sell_on_rsi_cross_above_overbought_with_macd_below_signal() {
    let evaluator = SignalEvaluator::default();
    let previous = snap(Some(69.0), 0.0, 0.0);
    let current = snap(Some(72.0), -0.2, -0.1);
    assert_eq!(evaluator.evaluate(&previous, &current), Ok(Signal::Sell));

    let previous = snap(Some(70.0), 0.0, 0.0);
    assert_eq!(evaluator.evaluate(&previous, &current), Ok(Signal::Sell));
}

#[test]
fn test_no_sell_when_already_overbought() {
    let evaluator = SignalEvaluator::default();
    let previous = snap(Some(75.0), 0.0, 0.0);
    let current = snap(Some(80.0), -0.2, -0.1);
    assert_eq!(evaluator.evaluate(&previous, &current), Ok(Signal::None));
}

#[test]
fn test_undefined_rsi_is_insufficient_history() {
    let evaluator = SignalEvaluator::default();
    let defined = snap(Some(50.0), 0.0, 0.0);
    let undefined = snap(None, 0.0, 0.0);

    assert_eq!(
        evaluator.evaluate(&undefined, &defined),
        Err(SignalError::InsufficientHistory)
    );
    assert_eq!(
        evaluator.evaluate(&defined, &undefined),
        Err(SignalError::InsufficientHistory)
    );
}

#[test]
fn test_evaluation_is_pure() {
    let evaluator = SignalEvaluator::default();
    let previous = snap(Some(31.0), 0.1, 0.0);
    let current = snap(Some(28.0), 0.2, 0.1);

    let first = evaluator.evaluate(&previous, &current);
    for _ in 0..10 {
        assert_eq!(evaluator.evaluate(&previous, &current), first);
    }
    // Evaluating an unrelated pair in between changes nothing.
    let _ = evaluator.evaluate(&current, &previous);
    assert_eq!(evaluator.evaluate(&previous, &current), first);
}

#[test]
fn test_buy_exactly_at_crossing_bar() {
    let evaluator = SignalEvaluator::default();
    let rsi = [45.0, 41.0, 38.0, 35.0, 33.0, 31.0, 28.0, 26.0, 27.0, 29.0];
    let snapshots: Vec<IndicatorSnapshot> = rsi
        .iter()
        .map(|&value| snap(Some(value), 0.5, 0.3))
        .collect();

    let signals: Vec<Signal> = snapshots
        .windows(2)
        .map(|pair| evaluator.evaluate(&pair[0], &pair[1]).unwrap())
        .collect();

    // windows(2) index 5 is the (31, 28) pair, i.e. bar 6.
    for (i, signal) in signals.iter().enumerate() {
        let expected = if i == 5 { Signal::Buy } else { Signal::None };
        assert_eq!(*signal, expected, "bar {}", i + 1);
    }
}

#[test]
fn test_custom_thresholds() {
    let evaluator = SignalEvaluator::new(SignalThresholds {
        oversold: 20.0,
        overbought: 80.0,
    });
    let previous = snap(Some(31.0), 0.1, 0.0);
    assert_eq!(
        evaluator.evaluate(&previous, &snap(Some(28.0), 0.2, 0.1)),
        Ok(Signal::None)
    );
    assert_eq!(
        evaluator.evaluate(&snap(Some(21.0), 0.0, 0.0), &snap(Some(19.0), 0.2, 0.1)),
        Ok(Signal::Buy)
    );
}
