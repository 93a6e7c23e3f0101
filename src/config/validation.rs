//! Configuration validation utilities and rules
//!
//! [`Config::validate`] rejects configurations that cannot run at all. The
//! checks here only produce warnings for settings that run but are probably
//! not what the user wants.

use crate::{
    dns::{classify, parse_literal},
    error::Result,
    models::Config,
};
use std::net::IpAddr;

/// Configuration validator with advisory rules
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration and collect non-fatal warnings
    pub fn validate_comprehensive(config: &Config) -> Result<Vec<ValidationWarning>> {
        config.validate()?;

        let mut warnings = Vec::new();
        warnings.extend(Self::validate_target(config)?);
        warnings.extend(Self::validate_performance_settings(config));

        Ok(warnings)
    }

    /// Checks that only apply when the host is an IP literal
    fn validate_target(config: &Config) -> Result<Vec<ValidationWarning>> {
        let mut warnings = Vec::new();
        let Some(literal) = parse_literal(config.host.trim()) else {
            return Ok(warnings);
        };

        // Same canonical form the resolver probes: mapped IPv6 becomes IPv4
        let (ip, family) = classify(literal);
        let preference = config.network_preference()?;
        if !preference.allows(family) {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Error,
                format!("{} address {} cannot satisfy network override '{}'", family, ip, preference),
            ));
        }

        if ip.is_loopback() {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!("Target {} is a loopback address", ip),
            ));
        } else if Self::is_private(&ip) {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!("Target {} is in a private address range", ip),
            ));
        }

        if ip.is_unspecified() || ip.is_multicast() {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!("Target {} is not a unicast host address, probes will likely fail", ip),
            ));
        }

        Ok(warnings)
    }

    fn validate_performance_settings(config: &Config) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if config.interval_ms == 0 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                "Interval is 0: probes run back-to-back and may flood the target".to_string(),
            ));
        }

        if config.timeout_seconds > 60 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!("Long timeout of {}s will slow down failure detection", config.timeout_seconds),
            ));
        }

        if config.interval_ms > 0 && config.interval() < config.timeout() {
            // Probes are sequential, so a slow failure stretches the spacing.
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!(
                    "Interval of {}ms is shorter than the {}s timeout; failed probes will delay the next one",
                    config.interval_ms, config.timeout_seconds
                ),
            ));
        }

        warnings
    }

    fn is_private(ip: &IpAddr) -> bool {
        match ip {
            IpAddr::V4(ipv4) => ipv4.is_private() || ipv4.is_link_local(),
            // fc00::/7 unique local, fe80::/10 link local
            IpAddr::V6(ipv6) => {
                let first = ipv6.segments()[0];
                (first & 0xfe00) == 0xfc00 || (first & 0xffc0) == 0xfe80
            }
        }
    }
}

/// Validation warning levels
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationLevel {
    Info,
    Warning,
    Error,
}

impl ValidationLevel {
    /// Get display string for level
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }

    fn color(&self) -> colored::Color {
        match self {
            Self::Info => colored::Color::Blue,
            Self::Warning => colored::Color::Yellow,
            Self::Error => colored::Color::Red,
        }
    }
}

/// Configuration validation warning
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(level: ValidationLevel, message: String) -> Self {
        Self { level, message }
    }

    /// Format warning for display
    pub fn format(&self, use_color: bool) -> String {
        if use_color {
            use colored::Colorize;
            format!("[{}] {}", self.level.as_str().color(self.level.color()).bold(), self.message)
        } else {
            format!("[{}] {}", self.level.as_str(), self.message)
        }
    }
}

/// Convenience function for comprehensive configuration validation
pub fn validate_config(config: &Config) -> Result<Vec<ValidationWarning>> {
    ConfigValidator::validate_comprehensive(config)
}
