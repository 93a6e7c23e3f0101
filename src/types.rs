//! Type definitions and aliases

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// IP address family a target resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressFamily {
    Ipv4,
    Ipv6,
}

impl AddressFamily {
    /// Family of an address as written, without unmapping IPv4-mapped forms
    pub fn of(ip: &IpAddr) -> Self {
        match ip {
            IpAddr::V4(_) => Self::Ipv4,
            IpAddr::V6(_) => Self::Ipv6,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ipv4 => "IPv4",
            Self::Ipv6 => "IPv6",
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Family restriction requested through the network override
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NetworkPreference {
    /// Use whichever address resolution returns first
    #[default]
    Any,
    /// Only accept IPv4 addresses
    Ipv4Only,
    /// Only accept IPv6 addresses
    Ipv6Only,
}

impl NetworkPreference {
    /// Whether an address of the given family satisfies this preference
    pub fn allows(&self, family: AddressFamily) -> bool {
        match self {
            Self::Any => true,
            Self::Ipv4Only => family == AddressFamily::Ipv4,
            Self::Ipv6Only => family == AddressFamily::Ipv6,
        }
    }

    /// Parse an optional override string, treating `None` as [`NetworkPreference::Any`]
    pub fn from_override(network: Option<&str>) -> Result<Self> {
        match network {
            Some(value) => value.parse(),
            None => Ok(Self::Any),
        }
    }
}

impl FromStr for NetworkPreference {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "ip" | "tcp" => Ok(Self::Any),
            "4" | "ip4" | "ipv4" | "tcp4" | "ip4:icmp" => Ok(Self::Ipv4Only),
            "6" | "ip6" | "ipv6" | "tcp6" | "ip6:ipv6-icmp" => Ok(Self::Ipv6Only),
            other => Err(AppError::config(format!(
                "Unknown network '{}' (expected one of: tcp, tcp4, tcp6, ip4, ip6)",
                other
            ))),
        }
    }
}

impl fmt::Display for NetworkPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Ipv4Only => f.write_str("ipv4"),
            Self::Ipv6Only => f.write_str("ipv6"),
        }
    }
}

/// Latency classification used for colored output
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PerformanceLevel {
    /// Under 50 ms
    Excellent,
    /// 50-150 ms
    Good,
    /// 150-500 ms
    Fair,
    /// 500 ms and above
    Poor,
}

impl PerformanceLevel {
    /// Classify a single round-trip time in milliseconds
    pub fn from_latency_ms(latency_ms: f64) -> Self {
        if latency_ms < 50.0 {
            Self::Excellent
        } else if latency_ms < 150.0 {
            Self::Good
        } else if latency_ms < 500.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}
