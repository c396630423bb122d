//! Yahoo Finance market data provider implementation

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use tracing::debug;

use super::messages::ChartResponse;
use crate::models::Bar;
use crate::services::market_data::{MarketDataProvider, ProviderError};

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Range used when only the newest bar is wanted.
const LATEST_RANGE: &str = "1d";

/// Fetches OHLC bars from the public chart endpoint.
#[derive(Debug, Clone)]
pub struct YahooChartProvider {
    client: reqwest::Client,
    base_url: String,
    interval: String,
}

impl Default for YahooChartProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooChartProvider {
    pub fn new() -> Self {
        Self::with_client(DEFAULT_BASE_URL, reqwest::Client::new())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            interval: "1m".to_string(),
        }
    }

    /// Bar width, e.g. `1m`, `5m`, `1d`.
    pub fn with_interval(mut self, interval: impl Into<String>) -> Self {
        self.interval = interval.into();
        self
    }

    async fn fetch_chart(&self, symbol: &str, range: &str) -> Result<Vec<Bar>, ProviderError> {
        let url = format!("{}/{}", self.base_url, symbol);
        debug!(symbol = %symbol, range = %range, interval = %self.interval, "requesting chart");

        let response = self
            .client
            .get(&url)
            .query(&[("range", range), ("interval", self.interval.as_str())])
            .header(USER_AGENT, "Mozilla/5.0 (compatible; momentum-watch)")
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        let parsed: Result<ChartResponse, _> = serde_json::from_str(&body);

        // Error payloads come with non-2xx statuses, so inspect the body first.
        if let Ok(ChartResponse { chart }) = &parsed {
            if let Some(error) = &chart.error {
                if error.code.eq_ignore_ascii_case("not found") {
                    return Err(ProviderError::UnknownSymbol(symbol.to_string()));
                }
                return Err(ProviderError::Api {
                    code: error.code.clone(),
                    description: error.description.clone(),
                });
            }
        }

        if !status.is_success() {
            return Err(ProviderError::Status {
                symbol: symbol.to_string(),
                status: status.as_u16(),
            });
        }

        let chart = parsed.map_err(|e| ProviderError::Parse(e.to_string()))?.chart;
        match chart.result.and_then(|results| results.into_iter().next()) {
            Some(result) => result.into_bars(),
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl MarketDataProvider for YahooChartProvider {
    async fn fetch_latest_bar(&self, symbol: &str) -> Result<Option<Bar>, ProviderError> {
        let bars = self.fetch_chart(symbol, LATEST_RANGE).await?;
        Ok(bars.into_iter().last())
    }

    async fn fetch_history(&self, symbol: &str, period: &str) -> Result<Vec<Bar>, ProviderError> {
        self.fetch_chart(symbol, period).await
    }
}
