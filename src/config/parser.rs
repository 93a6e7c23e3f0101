//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::Cli,
    config::env::EnvManager,
    error::{AppError, Result},
    models::Config,
};
use std::path::PathBuf;

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
    env_file: PathBuf,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            env_file: PathBuf::from(".env"),
        }
    }

    /// Read defaults from a different env file
    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.env_file = path.into();
        self
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<Config> {
        self.cli.validate().map_err(AppError::config)?;

        let mut config = Config::default();

        // .env values land in the process environment without overriding it
        EnvManager::load_env_file_from(&self.env_file, self.cli.debug)?;
        config.merge_from_env()?;

        self.apply_cli_overrides(&mut config);

        config.validate()?;

        Ok(config)
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut Config) {
        if let Some(ref host) = self.cli.host {
            config.host = host.trim().to_string();
        }

        // Flags left at their default do not override env values
        if self.cli.timeout != crate::defaults::DEFAULT_TIMEOUT.as_secs() {
            config.timeout_seconds = self.cli.timeout;
        }

        if self.cli.port != crate::defaults::DEFAULT_PORT {
            config.port = self.cli.port;
        }

        if self.cli.interval != crate::defaults::DEFAULT_INTERVAL.as_millis() as u64 {
            config.interval_ms = self.cli.interval;
        }

        if let Some(ref network) = self.cli.network {
            config.network = Some(network.clone());
        }

        if self.cli.color {
            config.enable_color = true;
        } else if self.cli.no_color {
            config.enable_color = false;
        } else {
            config.enable_color = config.enable_color && self.cli.use_colors();
        }

        // CLI-only flags
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;

        if config.debug {
            eprintln!("Applied CLI overrides to configuration");
            eprintln!("{}", display_config_summary(config));
        }
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    ConfigParser::new(cli).parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let mut summary = Vec::new();

    summary.push(format!("Host: {}", config.host));
    summary.push(format!("Network: {}", config.network.as_deref().unwrap_or("any")));
    summary.push(format!("Port: {}", config.port));
    summary.push(format!("Timeout: {}s", config.timeout_seconds));
    summary.push(format!("Interval: {}ms", config.interval_ms));
    summary.push(format!("Color Output: {}", config.enable_color));
    summary.push(format!("Verbose: {}", config.verbose));
    summary.push(format!("Debug: {}", config.debug));

    summary.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ENV_LOCK;
    use clap::Parser;
    use std::env;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const VARS: [&str; 5] = [
        "PING_TIMEOUT_SECONDS",
        "PING_NETWORK",
        "PING_PORT",
        "PING_INTERVAL_MS",
        "ENABLE_COLOR",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn parse(args: &[&str]) -> Result<Config> {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from(args);
        ConfigParser::new(cli)
            .with_env_file(dir.path().join(".env"))
            .parse()
    }

    #[test]
    fn test_defaults_with_host() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let config = parse(&["easy-ping", "--no-color", "example.com"]).unwrap();
        assert_eq!(config.host, "example.com");
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.port, 80);
        assert_eq!(config.interval_ms, 0);
        assert!(config.network.is_none());
        assert!(!config.enable_color);
    }

    #[test]
    fn test_missing_host_is_config_error() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let err = parse(&["easy-ping"]).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_cli_overrides() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let config = parse(&[
            "easy-ping", "-W", "5", "-p", "443", "-i", "200", "--net", "ip6", "--verbose", "::1",
        ])
        .unwrap();

        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.port, 443);
        assert_eq!(config.interval_ms, 200);
        assert_eq!(config.network.as_deref(), Some("ip6"));
        assert!(config.verbose);
        assert!(!config.debug);
    }

    #[test]
    fn test_env_values_apply_and_cli_wins() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        env::set_var("PING_PORT", "8080");
        env::set_var("PING_TIMEOUT_SECONDS", "3");

        let from_env = parse(&["easy-ping", "example.com"]);
        let cli_wins = parse(&["easy-ping", "-p", "22", "example.com"]);
        clear_env();

        let from_env = from_env.unwrap();
        assert_eq!(from_env.port, 8080);
        assert_eq!(from_env.timeout_seconds, 3);

        let cli_wins = cli_wins.unwrap();
        assert_eq!(cli_wins.port, 22);
        assert_eq!(cli_wins.timeout_seconds, 3);
    }

    #[test]
    fn test_invalid_env_value_rejected() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        env::set_var("PING_NETWORK", "udp");

        let result = parse(&["easy-ping", "example.com"]);
        clear_env();

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_env_file_supplies_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "PING_INTERVAL_MS=750").unwrap();
        writeln!(file, "PING_NETWORK=tcp4").unwrap();

        let cli = Cli::parse_from(["easy-ping", "example.com"]);
        let result = ConfigParser::new(cli).with_env_file(file.path()).parse();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.interval_ms, 750);
        assert_eq!(config.network.as_deref(), Some("tcp4"));
    }

    #[test]
    fn test_config_summary() {
        let config = Config {
            host: "example.com".to_string(),
            ..Config::default()
        };
        let summary = display_config_summary(&config);

        assert!(summary.contains("Host: example.com"));
        assert!(summary.contains("Network: any"));
        assert!(summary.contains("Port: 80"));
        assert!(summary.contains("Interval: 0ms"));
    }
}
