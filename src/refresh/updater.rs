//! Background GeoIP database updater.
//!
//! Mostly sleeps. Periodically runs the refresh command and, when it succeeds,
//! tells the pipeline to reopen the databases. It never touches the lookup
//! handles itself.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::command::RefreshCommand;
use super::signal::RefreshNotifier;
use crate::config::{Config, REFRESH_BACKOFF, REFRESH_PERIOD};

/// How long the updater waits between refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSchedule {
    /// Wait after a successful refresh (and before the first one)
    pub period: Duration,
    /// Wait after a failed refresh
    pub backoff: Duration,
}

impl RefreshSchedule {
    /// Reads the period and backoff from the worker configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            period: config.refresh_period(),
            backoff: config.refresh_backoff(),
        }
    }
}

impl Default for RefreshSchedule {
    fn default() -> Self {
        Self {
            period: REFRESH_PERIOD,
            backoff: REFRESH_BACKOFF,
        }
    }
}

/// Periodically refreshes the reference databases.
pub struct ReferenceDataUpdater<C> {
    command: C,
    notifier: RefreshNotifier,
    schedule: RefreshSchedule,
    wait: Duration,
}

impl<C: RefreshCommand> ReferenceDataUpdater<C> {
    /// Creates an updater; the first refresh happens one period after `run` starts.
    pub fn new(command: C, notifier: RefreshNotifier, schedule: RefreshSchedule) -> Self {
        Self {
            command,
            notifier,
            schedule,
            wait: schedule.period,
        }
    }

    /// Time the updater will sleep before its next refresh.
    pub fn wait_interval(&self) -> Duration {
        self.wait
    }

    /// Runs the refresh command once and returns the next wait interval.
    ///
    /// Failures are logged and shorten the wait to the backoff; success
    /// restores the full period and posts a reload notification.
    pub async fn refresh_once(&mut self) -> Duration {
        log::info!("Running GeoIP update...");

        match self.command.run().await {
            Err(e) => {
                log::error!("Update error: {}", e);
                if let Some(output) = e.output() {
                    log::error!("Update output: {}", output.trim_end());
                }
                // Failed: retry sooner than the long period.
                self.wait = self.schedule.backoff;
            }
            Ok(()) => {
                log::info!("GeoIP updated, success.");
                self.wait = self.schedule.period;
                self.notifier.notify();
            }
        }

        self.wait
    }

    /// Sleep/refresh loop; returns only when `cancel` fires.
    pub async fn run(mut self, cancel: CancellationToken) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.wait) => {}
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = self.refresh_once() => {}
            }
        }
        log::debug!("GeoIP updater stopped");
    }
}

impl<C: RefreshCommand + 'static> ReferenceDataUpdater<C> {
    /// Spawns the loop on the current runtime.
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(cancel))
    }
}
