//! Probe loop, result delivery and shutdown
//!
//! The scheduler spawns one probe task that runs back-to-back probes (or
//! spaced by the configured interval) and pushes every outcome, together with
//! the statistics right after it, into an unbounded ordered channel. The
//! calling task drains that channel into the [`Reporter`] until the shutdown
//! future resolves. Shutdown stops the probe task, prints whatever was
//! already delivered, then prints one statistics block.

use crate::{
    error::Result,
    logging::NetworkLogger,
    models::{ProbeOutcome, Target},
    output::Reporter,
    prober::Prober,
    stats::{ProbeStats, StatsAggregator},
};
use std::future::Future;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Per-run probe settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeSettings {
    /// Upper bound on a single probe
    pub timeout: Duration,
    /// Pause between probes; zero fires the next probe immediately
    pub interval: Duration,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            timeout: crate::defaults::DEFAULT_TIMEOUT,
            interval: crate::defaults::DEFAULT_INTERVAL,
        }
    }
}

/// One probe outcome paired with the counters as of that probe
#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub outcome: ProbeOutcome,
    pub stats: ProbeStats,
}

/// Drives the probe loop for a single target
pub struct ProbeScheduler {
    target: Target,
    settings: ProbeSettings,
    prober: Arc<dyn Prober>,
    aggregator: Arc<StatsAggregator>,
    logger: Option<Arc<NetworkLogger>>,
}

impl ProbeScheduler {
    pub fn new(target: Target, settings: ProbeSettings, prober: Arc<dyn Prober>) -> Self {
        Self {
            target,
            settings,
            prober,
            aggregator: Arc::new(StatsAggregator::new()),
            logger: None,
        }
    }

    /// Attach a logger for per-probe debug events
    pub fn with_logger(mut self, logger: Arc<NetworkLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Shared handle to the running statistics
    pub fn aggregator(&self) -> Arc<StatsAggregator> {
        Arc::clone(&self.aggregator)
    }

    /// Probe until Ctrl-C or SIGTERM
    pub async fn run<W: Write>(self, reporter: &mut Reporter<W>) -> Result<ProbeStats> {
        self.run_until(reporter, shutdown_signal()).await
    }

    /// Probe until `shutdown` resolves, then print the final statistics.
    ///
    /// Returns the statistics that were printed.
    pub async fn run_until<W, F>(self, reporter: &mut Reporter<W>, shutdown: F) -> Result<ProbeStats>
    where
        W: Write,
        F: Future<Output = ()>,
    {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let probe_task = self.spawn_probe_loop(tx);

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown => break,
                report = rx.recv() => match report {
                    Some(report) => reporter.probe(&report.outcome, &report.stats)?,
                    // The probe task only drops its sender when it ends.
                    None => break,
                },
            }
        }

        let result = finish(probe_task, &mut rx, reporter, &self.aggregator).await;
        if let (Err(e), Some(logger)) = (&result, &self.logger) {
            crate::log_warn!(logger.logger(), "Probe loop ended abnormally: {}", e);
        }
        result
    }

    fn spawn_probe_loop(&self, tx: UnboundedSender<ProbeReport>) -> JoinHandle<()> {
        let target = self.target.clone();
        let settings = self.settings;
        let prober = Arc::clone(&self.prober);
        let aggregator = Arc::clone(&self.aggregator);
        let logger = self.logger.clone();

        tokio::spawn(async move {
            loop {
                let outcome = prober.probe(&target, settings.timeout).await;
                // Counting and sending must not straddle an await.
                let stats = aggregator.update(&outcome);
                let report = ProbeReport { outcome, stats };
                let logged = logger.as_ref().map(|_| report.clone());

                if tx.send(report).is_err() {
                    // Receiver gone: the reporter has shut down.
                    break;
                }

                if let (Some(logger), Some(report)) = (&logger, logged) {
                    logger.log_probe(&target, &report.outcome, &report.stats).await;
                }

                if settings.interval.is_zero() {
                    tokio::task::yield_now().await;
                } else {
                    tokio::time::sleep(settings.interval).await;
                }
            }
        })
    }
}

/// Stop the probe task, flush delivered reports and print the summary
async fn finish<W: Write>(
    probe_task: JoinHandle<()>,
    rx: &mut UnboundedReceiver<ProbeReport>,
    reporter: &mut Reporter<W>,
    aggregator: &StatsAggregator,
) -> Result<ProbeStats> {
    probe_task.abort();
    let failure = match probe_task.await {
        Err(e) if !e.is_cancelled() => Some(e),
        _ => None,
    };

    // The probe task has stopped, so nothing new can arrive and the
    // aggregator matches exactly the reports printed.
    while let Ok(report) = rx.try_recv() {
        reporter.probe(&report.outcome, &report.stats)?;
    }

    let stats = aggregator.snapshot();
    reporter.summary(&stats)?;

    match failure {
        Some(e) => Err(e.into()),
        None => Ok(stats),
    }
}

/// Resolves on Ctrl-C, or SIGTERM on Unix
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            // Without a handler the only way out is SIGTERM/SIGKILL.
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
