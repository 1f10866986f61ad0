//! The poll loop: fetch, compare, notify, sleep.

use crate::config::NotifierConfig;
use crate::detect::{ChangeDetector, Observation, detector_for};
use crate::error::Result;
use crate::notify::{MessageFormatter, Notifier, WebhookNotifier};
use crate::sheet::{HttpSheetFetcher, SheetFetcher};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// What one poll did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// First successful fetch; state recorded, nothing sent.
    Baseline,
    /// Nothing changed since the previous fetch.
    Unchanged,
    /// Changes were found and delivery was attempted for each.
    Notified {
        /// Messages the webhook accepted.
        sent: usize,
        /// Messages that failed to deliver (not retried).
        failed: usize,
    },
    /// Fetch or parse failed; held state untouched.
    Skipped {
        /// Why the poll was skipped.
        reason: String,
    },
}

/// Owns the fetcher, detector and notifier and drives them one at a time.
pub struct Monitor {
    fetcher: Box<dyn SheetFetcher>,
    notifier: Box<dyn Notifier>,
    detector: Box<dyn ChangeDetector>,
    formatter: MessageFormatter,
    interval: Duration,
}

impl Monitor {
    /// Assemble a monitor from parts.
    pub fn new(
        fetcher: Box<dyn SheetFetcher>,
        notifier: Box<dyn Notifier>,
        detector: Box<dyn ChangeDetector>,
        formatter: MessageFormatter,
        interval: Duration,
    ) -> Self {
        Self {
            fetcher,
            notifier,
            detector,
            formatter,
            interval,
        }
    }

    /// Build the HTTP-backed monitor described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &NotifierConfig) -> Result<Self> {
        let client = crate::http::build_client(config.request_timeout())?;

        let fetcher = HttpSheetFetcher::builder()
            .with_url(&config.sheet_url)
            .with_client(client.clone())
            .build()?;
        let notifier = WebhookNotifier::builder()
            .with_url(&config.webhook_url)
            .with_client(client)
            .build()?;

        Ok(Self::new(
            Box::new(fetcher),
            Box::new(notifier),
            detector_for(&config.watch),
            MessageFormatter::new(&config.message),
            config.check_interval(),
        ))
    }

    /// Time slept between polls.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run a single fetch/compare/notify cycle.
    ///
    /// Never fails: every error is logged and reflected in the outcome.
    pub async fn poll_once(&mut self) -> PollOutcome {
        let sheet = match self.fetcher.fetch().await {
            Ok(sheet) => sheet,
            Err(e) if e.is_transient() => {
                warn!(source = %self.fetcher.name(), error = %e, "Sheet fetch failed, retrying next interval");
                return PollOutcome::Skipped {
                    reason: e.to_string(),
                };
            }
            Err(e) => {
                error!(source = %self.fetcher.name(), error = %e, "Sheet fetcher is misconfigured, retrying next interval");
                return PollOutcome::Skipped {
                    reason: e.to_string(),
                };
            }
        };
        debug!(rows = sheet.len(), "Fetched sheet");

        let observation = match self.detector.observe(&sheet) {
            Ok(observation) => observation,
            Err(e) => {
                warn!(detector = self.detector.name(), error = %e, "Sheet did not match the watched layout");
                return PollOutcome::Skipped {
                    reason: e.to_string(),
                };
            }
        };

        match observation {
            Observation::Baseline => {
                info!(detector = self.detector.name(), "Initial check completed, baseline established");
                PollOutcome::Baseline
            }
            Observation::Unchanged => {
                debug!("No changes");
                PollOutcome::Unchanged
            }
            Observation::Changed(changes) => {
                info!(count = changes.len(), "Change detected");
                let (mut sent, mut failed) = (0, 0);

                for change in &changes {
                    let message = self.formatter.format(change);
                    match self.notifier.send(&message).await {
                        Ok(()) => {
                            info!(%message, "Notification sent");
                            sent += 1;
                        }
                        Err(e) => {
                            error!(%message, error = %e, "Notification delivery failed");
                            failed += 1;
                        }
                    }
                }

                PollOutcome::Notified { sent, failed }
            }
        }
    }

    /// Poll now, then once per interval, until `shutdown` resolves.
    ///
    /// Shutdown is observed between polls; an in-flight poll is bounded by
    /// the HTTP timeout.
    pub async fn run<S>(&mut self, shutdown: S)
    where
        S: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        info!(interval_secs = self.interval.as_secs_f64(), "Monitoring started");

        loop {
            let outcome = self.poll_once().await;
            debug!(?outcome, "Poll finished");

            tokio::select! {
                _ = &mut shutdown => {
                    info!("Monitoring stopped");
                    break;
                }
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
    }
}
