//! Monitoring runtime: owns the active symbol's poll loop.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info, warn};

use crate::config::EngineConfig;
use crate::core::scheduler::{Cycle, RepeatingTask, StopSignal};
use crate::error::{ConfigError, EngineError, MonitorError};
use crate::models::{Bar, Signal, StatusReport};
use crate::services::market_data::{MarketDataProvider, ProviderError};
use crate::services::notification::NotificationSink;
use crate::signals::engine::EngineState;

type StatusSender = Arc<watch::Sender<Option<StatusReport>>>;

/// Entry point for the presentation layer.
///
/// The presentation side only calls [`Monitor::start`], [`Monitor::stop`]
/// and [`Monitor::change_symbol`], and reads status through
/// [`Monitor::subscribe`]. Engine state lives inside the poll task and is
/// never shared.
pub struct Monitor {
    config: EngineConfig,
    provider: Arc<dyn MarketDataProvider>,
    notifier: Arc<dyn NotificationSink>,
    status: StatusSender,
    session: Mutex<Option<Session>>,
}

struct Session {
    symbol: String,
    task: RepeatingTask,
}

impl Monitor {
    /// Validates `config` up front; nothing is spawned until [`Monitor::start`].
    pub fn new(
        config: EngineConfig,
        provider: Arc<dyn MarketDataProvider>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let (status_tx, _) = watch::channel(None);

        Ok(Self {
            config,
            provider,
            notifier,
            status: Arc::new(status_tx),
            session: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Status updates, one per completed cycle.
    pub fn subscribe(&self) -> watch::Receiver<Option<StatusReport>> {
        self.status.subscribe()
    }

    pub fn latest_status(&self) -> Option<StatusReport> {
        self.status.borrow().clone()
    }

    /// Start monitoring `symbol`. Fails if a session is already running.
    pub async fn start(&self, symbol: &str) -> Result<(), MonitorError> {
        let state = EngineState::new(symbol, self.config.clone())?;

        let mut session = self.session.lock().await;
        if let Some(active) = session.as_ref().filter(|s| s.task.is_running()) {
            return Err(MonitorError::AlreadyRunning(active.symbol.clone()));
        }

        *session = Some(self.spawn_session(state));
        Ok(())
    }

    /// Replace the monitored symbol. The old loop is fully stopped before a
    /// fresh engine state starts, so bars from two symbols never mix.
    pub async fn change_symbol(&self, symbol: &str) -> Result<(), MonitorError> {
        let state = EngineState::new(symbol, self.config.clone())?;

        let mut session = self.session.lock().await;
        if let Some(previous) = session.take() {
            info!(from = %previous.symbol, to = %state.symbol(), "changing symbol");
            previous.task.stop().await;
        }

        *session = Some(self.spawn_session(state));
        Ok(())
    }

    /// Stop monitoring. Takes effect before the next fetch; an in-flight
    /// fetch result is discarded.
    pub async fn stop(&self) {
        let mut session = self.session.lock().await;
        if let Some(active) = session.take() {
            info!(symbol = %active.symbol, "stopping monitor");
            active.task.stop().await;
        }
    }

    pub async fn is_running(&self) -> bool {
        let session = self.session.lock().await;
        session.as_ref().is_some_and(|s| s.task.is_running())
    }

    pub async fn current_symbol(&self) -> Option<String> {
        let session = self.session.lock().await;
        session.as_ref().map(|s| s.symbol.clone())
    }

    fn spawn_session(&self, state: EngineState) -> Session {
        let symbol = state.symbol().to_string();
        let last_good = StatusReport::empty(symbol.clone());
        self.status.send_replace(Some(last_good.clone()));

        info!(
            symbol = %symbol,
            interval_secs = self.config.poll_interval_seconds,
            "starting monitor"
        );

        let cycle = PollCycle {
            state,
            provider: self.provider.clone(),
            notifier: self.notifier.clone(),
            status: self.status.clone(),
            last_good,
        };
        let task = RepeatingTask::spawn(
            format!("poll-{}", symbol),
            self.config.poll_interval(),
            cycle,
        );

        Session { symbol, task }
    }
}

/// fetch -> append -> recompute -> evaluate -> report -> notify.
struct PollCycle {
    state: EngineState,
    provider: Arc<dyn MarketDataProvider>,
    notifier: Arc<dyn NotificationSink>,
    status: StatusSender,
    last_good: StatusReport,
}

impl PollCycle {
    /// Seed with history while the series is empty, then poll the latest bar.
    async fn fetch(&self) -> Result<Vec<Bar>, ProviderError> {
        let symbol = self.state.symbol();
        if self.state.series().is_empty() {
            let period = &self.state.config().history_period;
            self.provider.fetch_history(symbol, period).await
        } else {
            Ok(self.provider.fetch_latest_bar(symbol).await?.into_iter().collect())
        }
    }

    fn publish(&self, report: StatusReport) {
        self.status.send_replace(Some(report));
    }

    fn notify_buy(&self, report: &StatusReport) {
        let title = "Buy Signal".to_string();
        let message = match report.current_price {
            Some(price) => format!("Buy {} at {:.2}", report.symbol, price),
            None => format!("Buy {}", report.symbol),
        };

        // Delivery runs detached so a slow sink never delays the loop.
        let notifier = self.notifier.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.notify(&title, &message).await {
                warn!(error = %e, "notification dropped");
            }
        });
    }
}

#[async_trait]
impl Cycle for PollCycle {
    async fn run_once(&mut self, stop: &StopSignal) {
        if stop.is_stopped() {
            return;
        }

        let fetched = tokio::select! {
            biased;
            _ = stop.stopped() => {
                debug!(symbol = %self.state.symbol(), "stop requested during fetch, discarding");
                return;
            }
            result = self.fetch() => result,
        };

        if stop.is_stopped() {
            debug!(symbol = %self.state.symbol(), "stop requested after fetch, discarding");
            return;
        }

        let outcome = fetched
            .map_err(EngineError::from)
            .and_then(|bars| self.state.ingest(bars).map_err(EngineError::from));

        match outcome {
            Ok(0) => {
                debug!(symbol = %self.state.symbol(), "no new data");
                let report = self.last_good.clone();
                self.publish(report);
            }
            Ok(appended) => {
                let report = self.state.report();
                debug!(
                    symbol = %report.symbol,
                    appended,
                    bars = report.bars,
                    signal = %report.signal,
                    "cycle complete"
                );

                match report.signal {
                    Signal::Buy => {
                        info!(symbol = %report.symbol, price = ?report.current_price, "BUY signal");
                        self.notify_buy(&report);
                    }
                    Signal::Sell => {
                        info!(symbol = %report.symbol, price = ?report.current_price, "SELL signal");
                    }
                    Signal::None => {}
                }

                self.last_good = report.clone();
                self.publish(report);
            }
            Err(e) => {
                match &e {
                    EngineError::Series(_) => {
                        error!(symbol = %self.state.symbol(), error = %e, "provider delivered out-of-order bars")
                    }
                    EngineError::Provider(_) => {
                        warn!(symbol = %self.state.symbol(), error = %e, "cycle failed, keeping last values")
                    }
                }
                let report = self.last_good.clone().with_error(e.to_string());
                self.publish(report);
            }
        }
    }
}
