//! Technical indicators: incremental state machines plus slice-based
//! reference calculations.

pub mod rolling;
pub mod set;

pub mod momentum;
pub mod trend;
pub mod volatility;

pub use rolling::RollingMean;
pub use set::IndicatorSet;
