//! Probe target and outcome data models

use crate::types::AddressFamily;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

/// A resolved probe target. Built once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Host string as given by the user
    pub host: String,
    /// Canonical resolved address
    pub address: IpAddr,
    /// Family the prober must use for this address
    pub family: AddressFamily,
}

impl Target {
    pub fn new(host: impl Into<String>, address: IpAddr, family: AddressFamily) -> Self {
        Self {
            host: host.into(),
            address,
            family,
        }
    }

    /// Whether the user gave a literal address rather than a name
    pub fn is_literal(&self) -> bool {
        crate::dns::parse_literal(&self.host).is_some()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}

/// Result classification of a single probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbeStatus {
    /// The connection was established and released
    Success,
    /// The attempt failed; `detail` is a human-readable reason
    Failure { detail: String },
}

/// Outcome of one probe attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeOutcome {
    /// When the attempt finished
    pub timestamp: DateTime<Utc>,
    /// Wall-clock duration of the attempt, success or failure
    pub elapsed: Duration,
    pub status: ProbeStatus,
}

impl ProbeOutcome {
    /// Create a successful outcome
    pub fn success(elapsed: Duration) -> Self {
        Self {
            timestamp: Utc::now(),
            elapsed,
            status: ProbeStatus::Success,
        }
    }

    /// Create a failed outcome
    pub fn failure(elapsed: Duration, detail: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            elapsed,
            status: ProbeStatus::Failure {
                detail: detail.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, ProbeStatus::Success)
    }

    /// Failure reason, if any
    pub fn error_detail(&self) -> Option<&str> {
        match &self.status {
            ProbeStatus::Success => None,
            ProbeStatus::Failure { detail } => Some(detail),
        }
    }

    /// Elapsed time in fractional milliseconds
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_nanos() as f64 / 1_000_000.0
    }
}
