//! Plain text formatting of probe lines and the statistics block

use crate::{
    models::{ProbeOutcome, Target},
    stats::ProbeStats,
};

/// Formats everything the probe prints to stdout
pub trait OutputFormatter: Send + Sync {
    /// Line printed once before probing starts
    fn format_banner(&self, target: &Target, port: u16) -> String;

    /// One line per probe, with the counters as of that probe
    fn format_probe(&self, target: &Target, outcome: &ProbeOutcome, stats: &ProbeStats) -> String;

    /// Final statistics block printed on shutdown
    fn format_summary(&self, target: &Target, stats: &ProbeStats) -> String;
}

/// Formatter producing uncolored output
#[derive(Debug, Clone, Default)]
pub struct PlainFormatter;

impl PlainFormatter {
    pub fn new() -> Self {
        Self
    }

    /// `Packets: sent = n, received = r, Lost = l(p% loss)`
    pub fn packet_counts(stats: &ProbeStats) -> String {
        format!(
            "Packets: sent = {}, received = {}, Lost = {}({}% loss)",
            stats.sent,
            stats.received,
            stats.lost,
            stats.loss_percent()
        )
    }

    pub fn latency(latency_ms: f64) -> String {
        format!("{:.3} ms", latency_ms)
    }

    /// Latency or `n/a` when no probe has completed yet
    pub fn optional_latency(latency_ms: Option<f64>) -> String {
        latency_ms.map_or_else(|| "n/a".to_string(), Self::latency)
    }

    pub fn round_trip_times(stats: &ProbeStats) -> String {
        format!(
            "Minimum: {}, Maximum: {}, Average: {}",
            Self::optional_latency(stats.min_rtt()),
            Self::optional_latency(stats.max_rtt()),
            Self::optional_latency(stats.mean_rtt())
        )
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_banner(&self, target: &Target, port: u16) -> String {
        if target.is_literal() {
            format!("Starting to ping {} (tcp port {})", target.address, port)
        } else {
            format!(
                "Starting to ping {} ({}) (tcp port {})",
                target.host, target.address, port
            )
        }
    }

    fn format_probe(&self, target: &Target, outcome: &ProbeOutcome, stats: &ProbeStats) -> String {
        let counts = Self::packet_counts(stats);
        let latency = Self::latency(outcome.elapsed_ms());
        match outcome.error_detail() {
            None => format!("Reply from {}: {}, Latency: {}", target.address, counts, latency),
            Some(detail) => format!(
                "Request to {} failed ({}): {}, Latency: {}",
                target.address, detail, counts, latency
            ),
        }
    }

    fn format_summary(&self, _target: &Target, stats: &ProbeStats) -> String {
        format!(
            "Statistics:\n{},\nApproximate round trip times in milli-seconds:\n{}",
            Self::packet_counts(stats),
            Self::round_trip_times(stats)
        )
    }
}
