//! Wire types for the v8 chart endpoint.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::Bar;
use crate::services::market_data::ProviderError;

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Vec<QuoteColumns>,
}

/// Column-oriented OHLCV; gaps are `null`.
#[derive(Debug, Default, Deserialize)]
pub struct QuoteColumns {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

impl ChartResult {
    /// Zip the columns into bars, dropping rows with any missing price and
    /// rows that do not advance the timestamp.
    pub fn into_bars(self) -> Result<Vec<Bar>, ProviderError> {
        let Some(quote) = self.indicators.quote.into_iter().next() else {
            return Ok(Vec::new());
        };

        let mut bars: Vec<Bar> = Vec::with_capacity(self.timestamp.len());
        for (i, ts) in self.timestamp.iter().enumerate() {
            let (Some(open), Some(high), Some(low), Some(close)) = (
                cell(&quote.open, i),
                cell(&quote.high, i),
                cell(&quote.low, i),
                cell(&quote.close, i),
            ) else {
                continue;
            };

            let timestamp = DateTime::<Utc>::from_timestamp(*ts, 0)
                .ok_or_else(|| ProviderError::Parse(format!("timestamp out of range: {}", ts)))?;

            if bars.last().is_some_and(|prev| prev.timestamp >= timestamp) {
                continue;
            }

            let mut bar = Bar::new(timestamp, open, high, low, close);
            bar.volume = cell(&quote.volume, i);
            bars.push(bar);
        }

        Ok(bars)
    }
}

fn cell(values: &[Option<f64>], i: usize) -> Option<f64> {
    values.get(i).copied().flatten()
}
