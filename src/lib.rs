//! Easy Ping
//!
//! A continuous reachability probe: resolves one host, probes it back to back
//! with timed TCP connects, prints a line per probe with running loss
//! counters, and prints a statistics block when interrupted.

pub mod app;
pub mod cli;
pub mod config;
pub mod dns;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod prober;
pub mod scheduler;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use dns::AddressResolver;
pub use error::{AppError, Result};
pub use models::{Config, ProbeOutcome, ProbeStatus, Target};
pub use output::{ColoredFormatter, OutputFormatter, OutputFormatterFactory, PlainFormatter, Reporter};
pub use prober::{Prober, TcpProber};
pub use scheduler::{ProbeScheduler, ProbeSettings};
pub use stats::{ProbeStats, StatsAggregator};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    pub const DEFAULT_PORT: u16 = 80;
    pub const DEFAULT_INTERVAL: Duration = Duration::ZERO;
    pub const DEFAULT_ENABLE_COLOR: bool = true;

    pub const MAX_TIMEOUT_SECS: u64 = 300;
    /// One hour
    pub const MAX_INTERVAL_MS: u64 = 3_600_000;
}
