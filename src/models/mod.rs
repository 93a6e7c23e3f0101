//! Data models and structures for the reachability probe

pub mod config;
pub mod probe;

// Re-export main model types
pub use config::Config;
pub use probe::{ProbeOutcome, ProbeStatus, Target};
