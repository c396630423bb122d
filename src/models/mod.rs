//! Shared data models spanning the engine layers.

pub mod bar;
pub mod indicators;
pub mod series;
pub mod signal;

pub use bar::Bar;
pub use indicators::IndicatorSnapshot;
pub use series::PriceSeries;
pub use signal::{RiskLevel, Signal, StatusReport};
