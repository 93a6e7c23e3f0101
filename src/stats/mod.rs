//! Running statistics over the probe stream
//!
//! [`StatsAggregator`] owns the only mutable copy of the counters. The probe
//! loop feeds it through [`StatsAggregator::update`]; the reporter and the
//! shutdown path read consistent copies through [`StatsAggregator::snapshot`].

use crate::models::ProbeOutcome;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};

/// Point-in-time copy of the aggregate probe statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbeStats {
    /// Probes attempted
    pub sent: u64,
    /// Probes that connected
    pub received: u64,
    /// Probes that failed or timed out
    pub lost: u64,
    /// Smallest latency seen (`+inf` until the first probe)
    pub min_rtt_ms: f64,
    /// Largest latency seen (`-inf` until the first probe)
    pub max_rtt_ms: f64,
    /// Running mean latency
    pub mean_rtt_ms: f64,
}

impl ProbeStats {
    /// Statistics before any probe has been recorded
    pub fn empty() -> Self {
        Self {
            sent: 0,
            received: 0,
            lost: 0,
            min_rtt_ms: f64::INFINITY,
            max_rtt_ms: f64::NEG_INFINITY,
            mean_rtt_ms: 0.0,
        }
    }

    pub fn has_data(&self) -> bool {
        self.sent > 0
    }

    /// Rounded loss percentage, 0 when nothing has been sent
    pub fn loss_percent(&self) -> u64 {
        if self.sent == 0 {
            return 0;
        }
        (self.lost as f64 * 100.0 / self.sent as f64).round() as u64
    }

    pub fn min_rtt(&self) -> Option<f64> {
        self.has_data().then_some(self.min_rtt_ms)
    }

    pub fn max_rtt(&self) -> Option<f64> {
        self.has_data().then_some(self.max_rtt_ms)
    }

    pub fn mean_rtt(&self) -> Option<f64> {
        self.has_data().then_some(self.mean_rtt_ms)
    }

    fn record(&mut self, outcome: &ProbeOutcome) {
        let latency = outcome.elapsed_ms();

        self.sent += 1;
        if outcome.is_success() {
            self.received += 1;
        } else {
            self.lost += 1;
        }

        // Both bounds are checked on every update.
        self.min_rtt_ms = self.min_rtt_ms.min(latency);
        self.max_rtt_ms = self.max_rtt_ms.max(latency);

        let n = self.sent as f64;
        let mean = (self.mean_rtt_ms * (n - 1.0) + latency) / n;
        // Rounding can push the running mean an ulp outside [min, max].
        self.mean_rtt_ms = mean.clamp(self.min_rtt_ms, self.max_rtt_ms);
    }
}

impl Default for ProbeStats {
    fn default() -> Self {
        Self::empty()
    }
}

/// Thread-safe owner of the running probe statistics
#[derive(Debug, Default)]
pub struct StatsAggregator {
    stats: Mutex<ProbeStats>,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self {
            stats: Mutex::new(ProbeStats::empty()),
        }
    }

    /// Record one outcome and return the statistics right after it
    pub fn update(&self, outcome: &ProbeOutcome) -> ProbeStats {
        let mut stats = self.lock();
        stats.record(outcome);
        *stats
    }

    /// Consistent copy of the current statistics
    pub fn snapshot(&self) -> ProbeStats {
        *self.lock()
    }

    fn lock(&self) -> MutexGuard<'_, ProbeStats> {
        // Counters are plain data, a panicked writer cannot leave them half-written.
        self.stats.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
