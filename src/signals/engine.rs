//! Per-symbol engine state: bars, indicator history and the derived signal.

use tracing::debug;

use crate::config::{normalize_symbol, EngineConfig};
use crate::error::{ConfigError, SeriesError, SignalError};
use crate::indicators::IndicatorSet;
use crate::models::{Bar, IndicatorSnapshot, PriceSeries, RiskLevel, Signal, StatusReport};
use crate::signals::evaluator::{SignalEvaluator, SignalThresholds};

/// Everything the engine knows about one monitored symbol.
///
/// Owned exclusively by the poll loop; replaced wholesale when the symbol
/// changes, never patched.
#[derive(Debug, Clone)]
pub struct EngineState {
    symbol: String,
    config: EngineConfig,
    series: PriceSeries,
    indicators: IndicatorSet,
    evaluator: SignalEvaluator,
}

impl EngineState {
    /// Fails fast on an empty symbol or invalid configuration.
    pub fn new(symbol: &str, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let symbol = normalize_symbol(symbol)?;

        Ok(Self {
            symbol,
            indicators: IndicatorSet::new(&config),
            evaluator: SignalEvaluator::new(SignalThresholds::from(&config)),
            series: PriceSeries::new(),
            config,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn series(&self) -> &PriceSeries {
        &self.series
    }

    pub fn indicators(&self) -> &IndicatorSet {
        &self.indicators
    }

    /// Append one bar and extend the indicators. Strict: equal timestamps fail.
    pub fn append(&mut self, bar: Bar) -> Result<IndicatorSnapshot, SeriesError> {
        self.series.append(bar.clone())?;
        Ok(self.indicators.update(&bar))
    }

    /// Ingest a batch from the provider and return how many bars were appended.
    ///
    /// Bars repeating the latest timestamp are re-deliveries and skipped.
    /// Any bar older than its predecessor rejects the whole batch untouched.
    pub fn ingest(&mut self, bars: Vec<Bar>) -> Result<usize, SeriesError> {
        let mut last = self.series.last().map(|b| b.timestamp);
        let mut accepted = Vec::with_capacity(bars.len());

        for bar in bars {
            match last {
                Some(ts) if bar.timestamp == ts => {
                    debug!(symbol = %self.symbol, timestamp = %ts, "skipping re-delivered bar");
                }
                Some(ts) if bar.timestamp < ts => {
                    return Err(SeriesError::OutOfOrder {
                        last: ts,
                        attempted: bar.timestamp,
                    });
                }
                _ => {
                    last = Some(bar.timestamp);
                    accepted.push(bar);
                }
            }
        }

        let appended = accepted.len();
        for bar in accepted {
            self.append(bar)?;
        }
        Ok(appended)
    }

    pub fn current_price(&self) -> Option<f64> {
        self.series.last().map(|b| b.close)
    }

    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_atr(self.indicators.latest().and_then(|s| s.atr))
    }

    pub fn evaluate(&self) -> Result<Signal, SignalError> {
        self.evaluator.evaluate_latest(&self.indicators)
    }

    /// Signal for the latest bar; insufficient history reads as NONE.
    pub fn signal(&self) -> Signal {
        match self.evaluate() {
            Ok(signal) => signal,
            Err(SignalError::InsufficientHistory) => Signal::None,
        }
    }

    /// Read-only copy of the latest values for the presentation layer.
    pub fn report(&self) -> StatusReport {
        let risk_level = self.risk_level();
        let current_price = self.current_price();

        let mut report = StatusReport::empty(self.symbol.clone());
        report.current_price = current_price;
        report.risk_level = risk_level;
        report.risk_level_percent = current_price.and_then(|price| risk_level.percent_of(price));
        report.signal = self.signal();
        report.bars = self.series.len();
        report
    }
}
