//! Momentum Watch
//!
//! Monitors one ticker symbol and logs a status line per poll cycle.
//! Usage: `momentum-watch [SYMBOL]` (falls back to `SYMBOL`, then `NVDA`).

use std::env;
use std::sync::Arc;

use dotenvy::dotenv;
use momentum_watch::config::{get_environment, EngineConfig};
use momentum_watch::logging;
use momentum_watch::services::{LogNotifier, YahooChartProvider};
use momentum_watch::{Monitor, StatusReport};
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = EngineConfig::from_env()?;
    let symbol = env::args()
        .nth(1)
        .or_else(|| env::var("SYMBOL").ok())
        .unwrap_or_else(|| "NVDA".to_string());

    info!(environment = %get_environment(), "Starting Momentum Watch");

    let provider = match env::var("YAHOO_BASE_URL") {
        Ok(url) => YahooChartProvider::with_base_url(url),
        Err(_) => YahooChartProvider::new(),
    }
    .with_interval(config.bar_interval.clone());

    let monitor = Monitor::new(config, Arc::new(provider), Arc::new(LogNotifier))?;
    let mut status = monitor.subscribe();
    monitor.start(&symbol).await?;

    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                info!("Shutting down...");
                break;
            }
            changed = status.changed() => {
                if changed.is_err() {
                    break;
                }
                let report = status.borrow_and_update().clone();
                if let Some(report) = report {
                    log_status(&report);
                }
            }
        }
    }

    monitor.stop().await;
    info!("Stopped");
    Ok(())
}

fn log_status(report: &StatusReport) {
    let price = report
        .current_price
        .map(|p| format!("{:.2}", p))
        .unwrap_or_else(|| "-".to_string());
    let risk = report
        .risk_level_percent
        .map(|r| format!("{:.2}%", r))
        .unwrap_or_else(|| "unknown".to_string());

    match &report.error_message {
        Some(message) => warn!(
            symbol = %report.symbol,
            price = %price,
            risk = %risk,
            signal = %report.signal,
            error = %message,
            "cycle failed, showing last known values"
        ),
        None => info!(
            symbol = %report.symbol,
            price = %price,
            risk = %risk,
            signal = %report.signal,
            bars = report.bars,
            "status"
        ),
    }
}
