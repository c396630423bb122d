//! Yahoo Finance chart endpoint integration

pub mod messages;
pub mod provider;

pub use provider::{YahooChartProvider, DEFAULT_BASE_URL};
