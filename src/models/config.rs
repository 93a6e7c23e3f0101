//! Configuration data model and validation

use crate::types::{AppError, NetworkPreference, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Host name or IP address to probe
    #[serde(default)]
    pub host: String,

    /// Per-probe timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_seconds: u64,

    /// Optional address family override (`tcp4`, `ip6`, ...)
    #[serde(default)]
    pub network: Option<String>,

    /// TCP port each probe connects to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Delay between consecutive probes in milliseconds (0 = back-to-back)
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: String::new(),
            timeout_seconds: default_timeout_secs(),
            network: None,
            port: default_port(),
            interval_ms: default_interval_ms(),
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Get the inter-probe interval as Duration
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Parsed family override
    pub fn network_preference(&self) -> Result<NetworkPreference> {
        NetworkPreference::from_override(self.network.as_deref())
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(AppError::config("A target host or IP address is required"));
        }

        if self.host.chars().any(char::is_whitespace) {
            return Err(AppError::config(format!("Invalid host '{}': contains whitespace", self.host)));
        }

        if self.timeout_seconds == 0 {
            return Err(AppError::validation("Timeout must be greater than 0"));
        }

        if self.timeout_seconds > crate::defaults::MAX_TIMEOUT_SECS {
            return Err(AppError::validation(format!(
                "Timeout cannot exceed {} seconds",
                crate::defaults::MAX_TIMEOUT_SECS
            )));
        }

        if self.port == 0 {
            return Err(AppError::validation("Port must be greater than 0"));
        }

        if self.interval_ms > crate::defaults::MAX_INTERVAL_MS {
            return Err(AppError::validation(format!(
                "Interval cannot exceed {} ms",
                crate::defaults::MAX_INTERVAL_MS
            )));
        }

        self.network_preference()?;

        Ok(())
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(timeout) = std::env::var("PING_TIMEOUT_SECONDS") {
            self.timeout_seconds = timeout.parse()
                .map_err(|e| AppError::config(format!("Invalid PING_TIMEOUT_SECONDS value '{}': {}", timeout, e)))?;
        }

        if let Ok(network) = std::env::var("PING_NETWORK") {
            let network = network.trim();
            if !network.is_empty() {
                self.network = Some(network.to_string());
            }
        }

        if let Ok(port) = std::env::var("PING_PORT") {
            self.port = port.parse()
                .map_err(|e| AppError::config(format!("Invalid PING_PORT value '{}': {}", port, e)))?;
        }

        if let Ok(interval) = std::env::var("PING_INTERVAL_MS") {
            self.interval_ms = interval.parse()
                .map_err(|e| AppError::config(format!("Invalid PING_INTERVAL_MS value '{}': {}", interval, e)))?;
        }

        if let Ok(enable_color) = std::env::var("ENABLE_COLOR") {
            self.enable_color = enable_color.parse()
                .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", enable_color, e)))?;
        }

        Ok(())
    }
}

// Default value functions for serde
fn default_timeout_secs() -> u64 {
    crate::defaults::DEFAULT_TIMEOUT.as_secs()
}

fn default_port() -> u16 {
    crate::defaults::DEFAULT_PORT
}

fn default_interval_ms() -> u64 {
    crate::defaults::DEFAULT_INTERVAL.as_millis() as u64
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(host: &str) -> Config {
        Config {
            host: host.to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.port, 80);
        assert_eq!(config.interval(), Duration::ZERO);
        assert!(config.network.is_none());
    }

    #[test]
    fn test_default_config_requires_host() {
        let config = Config::default();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_valid_config() {
        assert!(config_for("example.com").validate().is_ok());
        assert!(config_for("192.0.2.1").validate().is_ok());
        assert!(config_for("::1").validate().is_ok());
    }

    #[test]
    fn test_host_with_whitespace_invalid() {
        assert!(config_for("exa mple.com").validate().is_err());
        assert!(config_for("   ").validate().is_err());
    }

    #[test]
    fn test_zero_timeout_invalid() {
        let mut config = config_for("example.com");
        config.timeout_seconds = 0;
        assert!(matches!(config.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_excessive_timeout_invalid() {
        let mut config = config_for("example.com");
        config.timeout_seconds = 301;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_port_invalid() {
        let mut config = config_for("example.com");
        config.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_network_invalid() {
        let mut config = config_for("example.com");
        config.network = Some("udp".to_string());
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        config.network = Some("tcp6".to_string());
        assert!(config.validate().is_ok());
        assert_eq!(config.network_preference().unwrap(), NetworkPreference::Ipv6Only);
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: Config = serde_json::from_str(r#"{"host": "example.com"}"#).unwrap();
        assert_eq!(config.host, "example.com");
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.port, 80);
    }
}
