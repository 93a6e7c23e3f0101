//! Colored formatter with terminal color support

use super::formatter::{OutputFormatter, PlainFormatter};
use crate::{
    models::{ProbeOutcome, Target},
    stats::ProbeStats,
    types::PerformanceLevel,
};
use colored::*;

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub success: Color,
    pub failure: Color,
    pub header: Color,
    pub excellent: Color,
    pub good: Color,
    pub fair: Color,
    pub poor: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            success: Color::Green,
            failure: Color::Red,
            header: Color::Cyan,
            excellent: Color::Green,
            good: Color::Cyan,
            fair: Color::Yellow,
            poor: Color::Magenta,
        }
    }
}

impl ColorScheme {
    pub fn for_level(&self, level: PerformanceLevel) -> Color {
        match level {
            PerformanceLevel::Excellent => self.excellent,
            PerformanceLevel::Good => self.good,
            PerformanceLevel::Fair => self.fair,
            PerformanceLevel::Poor => self.poor,
        }
    }
}

/// Formatter that colors latency by performance level and failures in red
#[derive(Debug, Clone, Default)]
pub struct ColoredFormatter {
    scheme: ColorScheme,
}

impl ColoredFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scheme(scheme: ColorScheme) -> Self {
        Self { scheme }
    }

    fn latency(&self, latency_ms: f64) -> ColoredString {
        PlainFormatter::latency(latency_ms)
            .color(self.scheme.for_level(PerformanceLevel::from_latency_ms(latency_ms)))
    }

    fn loss(&self, stats: &ProbeStats) -> ColoredString {
        let text = PlainFormatter::packet_counts(stats);
        if stats.lost == 0 {
            text.normal()
        } else {
            text.color(self.scheme.failure)
        }
    }
}

impl OutputFormatter for ColoredFormatter {
    fn format_banner(&self, target: &Target, port: u16) -> String {
        PlainFormatter::new()
            .format_banner(target, port)
            .color(self.scheme.header)
            .bold()
            .to_string()
    }

    fn format_probe(&self, target: &Target, outcome: &ProbeOutcome, stats: &ProbeStats) -> String {
        let latency = self.latency(outcome.elapsed_ms());
        match outcome.error_detail() {
            None => format!(
                "{} {}: {}, Latency: {}",
                "Reply from".color(self.scheme.success),
                target.address,
                self.loss(stats),
                latency
            ),
            Some(detail) => format!(
                "{} {} {}: {}, Latency: {}",
                "Request to".color(self.scheme.failure),
                target.address,
                format!("failed ({})", detail).color(self.scheme.failure).bold(),
                self.loss(stats),
                latency
            ),
        }
    }

    fn format_summary(&self, _target: &Target, stats: &ProbeStats) -> String {
        format!(
            "{}\n{},\nApproximate round trip times in milli-seconds:\n{}",
            "Statistics:".color(self.scheme.header).bold(),
            self.loss(stats),
            PlainFormatter::round_trip_times(stats)
        )
    }
}
