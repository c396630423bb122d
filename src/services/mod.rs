//! External collaborators: market data and notifications.

pub mod market_data;
pub mod notification;
pub mod yahoo;

pub use market_data::{MarketDataProvider, ProviderError};
pub use notification::{LogNotifier, NotificationError, NotificationSink};
pub use yahoo::YahooChartProvider;
