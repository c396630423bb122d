//! Cancellable repeating task: schedule, run once, reschedule unless stopped.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Receiving side of a stop request.
///
/// A dropped sender counts as a stop so a task can never outlive its owner.
#[derive(Debug, Clone)]
pub struct StopSignal {
    rx: watch::Receiver<bool>,
}

impl StopSignal {
    pub fn is_stopped(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Resolves once a stop has been requested.
    pub async fn stopped(&self) {
        let mut rx = self.rx.clone();
        let _ = rx.wait_for(|stopped| *stopped).await;
    }
}

/// One unit of periodic work.
#[async_trait]
pub trait Cycle: Send + 'static {
    async fn run_once(&mut self, stop: &StopSignal);
}

/// Runs a [`Cycle`] every `interval` on its own tokio task.
///
/// Cycles never overlap: the next tick is awaited only after the current
/// cycle returns, and ticks missed meanwhile are skipped. Stop is checked
/// before every cycle and raced against the wait for the next tick.
pub struct RepeatingTask {
    name: String,
    stop_tx: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl RepeatingTask {
    /// Spawn the task. The first cycle starts immediately.
    pub fn spawn<C: Cycle>(name: impl Into<String>, interval: Duration, mut cycle: C) -> Self {
        let name = name.into();
        let (stop_tx, stop_rx) = watch::channel(false);
        let stop = StopSignal { rx: stop_rx };

        let task_name = name.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            info!(task = %task_name, interval_ms = interval.as_millis() as u64, "repeating task started");
            loop {
                tokio::select! {
                    biased;
                    _ = stop.stopped() => break,
                    _ = ticker.tick() => {}
                }

                if stop.is_stopped() {
                    break;
                }
                cycle.run_once(&stop).await;
            }
            debug!(task = %task_name, "repeating task exited");
        });

        Self {
            name,
            stop_tx,
            handle: Some(handle),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ask the task to stop without waiting for it.
    pub fn request_stop(&self) {
        self.stop_tx.send_replace(true);
    }

    /// Request a stop and wait until the task has exited.
    pub async fn stop(mut self) {
        self.request_stop();
        if let Some(handle) = self.handle.take() {
            // A cycle that panicked is already gone; nothing left to clean up.
            let _ = handle.await;
        }
        info!(task = %self.name, "repeating task stopped");
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for RepeatingTask {
    fn drop(&mut self) {
        self.request_stop();
    }
}
