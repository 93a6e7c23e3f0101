//! Command-line interface module

use clap::Parser;

/// Easy Ping - continuously probe one host and report reachability
#[derive(Parser, Debug, Clone)]
#[command(name = "easy-ping")]
#[command(version = long_version(), about, long_about = None)]
#[command(after_help = "Press Ctrl-C to stop probing and print the statistics.")]
pub struct Cli {
    /// Host name or IP address to probe
    #[arg(value_name = "HOST")]
    pub host: Option<String>,

    /// Per-probe timeout in seconds
    #[arg(short = 'W', long, value_parser = parse_duration, default_value_t = crate::defaults::DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Address family override (ip, ip4, ip6, tcp4, tcp6, ...)
    #[arg(long = "net", value_name = "NETWORK")]
    pub network: Option<String>,

    /// TCP port each probe connects to
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..), default_value_t = crate::defaults::DEFAULT_PORT)]
    pub port: u16,

    /// Delay between probes in milliseconds (0 = back-to-back)
    #[arg(short, long, value_name = "MILLIS", default_value_t = crate::defaults::DEFAULT_INTERVAL.as_millis() as u64)]
    pub interval: u64,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> Result<(), String> {
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        match self.host.as_deref().map(str::trim) {
            None | Some("") => Err("Must specify a host name or IP address to probe".to_string()),
            Some(_) => Ok(()),
        }
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        if self.color {
            true
        } else if self.no_color {
            false
        } else {
            supports_color()
        }
    }
}

/// Version string with build metadata from build.rs
fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (",
        env!("GIT_COMMIT"),
        ", built ",
        env!("BUILD_TIME"),
        ")"
    )
}

/// Parse duration from seconds string
fn parse_duration(s: &str) -> Result<u64, String> {
    if s.starts_with('+') || s.starts_with("0x") || s.starts_with("0X") {
        return Err(format!("Invalid duration: {}", s));
    }

    s.parse::<u64>()
        .map_err(|_| format!("Invalid duration: {}", s))
        .and_then(|secs| {
            if secs == 0 {
                Err("Duration must be greater than 0".to_string())
            } else if secs > crate::defaults::MAX_TIMEOUT_SECS {
                Err(format!(
                    "Duration cannot exceed {} seconds",
                    crate::defaults::MAX_TIMEOUT_SECS
                ))
            } else {
                Ok(secs)
            }
        })
}

/// Check if the terminal supports color output
fn supports_color() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    #[cfg(target_os = "windows")]
    {
        if std::env::var("ANSICON").is_ok() || std::env::var("ConEmuANSI").is_ok() {
            return true;
        }
    }

    #[cfg(unix)]
    {
        true
    }
    #[cfg(not(unix))]
    {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing_basic() {
        let cli = Cli::parse_from(["easy-ping", "example.com"]);
        assert_eq!(cli.host.as_deref(), Some("example.com"));
        assert_eq!(cli.timeout, 10);
        assert_eq!(cli.port, 80);
        assert_eq!(cli.interval, 0);
        assert!(cli.network.is_none());
        assert!(!cli.verbose);
        assert!(!cli.debug);
    }

    #[test]
    fn test_cli_parsing_all_options() {
        let cli = Cli::parse_from([
            "easy-ping",
            "-W", "3",
            "--net", "tcp6",
            "-p", "443",
            "-i", "250",
            "--no-color",
            "--verbose",
            "--debug",
            "::1",
        ]);

        assert_eq!(cli.host.as_deref(), Some("::1"));
        assert_eq!(cli.timeout, 3);
        assert_eq!(cli.network.as_deref(), Some("tcp6"));
        assert_eq!(cli.port, 443);
        assert_eq!(cli.interval, 250);
        assert!(cli.no_color);
        assert!(cli.verbose);
        assert!(cli.debug);
    }

    #[test]
    fn test_port_zero_rejected() {
        assert!(Cli::try_parse_from(["easy-ping", "-p", "0", "localhost"]).is_err());
        assert!(Cli::try_parse_from(["easy-ping", "-p", "65536", "localhost"]).is_err());
    }

    #[test]
    fn test_duration_parsing() {
        assert_eq!(parse_duration("10").unwrap(), 10);
        assert_eq!(parse_duration("300").unwrap(), 300);
        assert_eq!(parse_duration("1").unwrap(), 1);

        assert!(parse_duration("0").is_err());
        assert!(parse_duration("301").is_err());
        assert!(parse_duration("").is_err());
        assert!(parse_duration("10.5").is_err());
        assert!(parse_duration("+10").is_err());
        assert!(parse_duration("0x10").is_err());
        assert!(parse_duration("-5").is_err());
    }

    #[test]
    fn test_cli_validation() {
        let conflict = Cli::parse_from(["easy-ping", "--color", "--no-color", "localhost"]);
        assert!(conflict.validate().unwrap_err().contains("--color and --no-color"));

        let no_host = Cli::parse_from(["easy-ping"]);
        assert!(no_host.validate().unwrap_err().contains("host name or IP address"));

        let blank_host = Cli::parse_from(["easy-ping", "  "]);
        assert!(blank_host.validate().is_err());

        let ok = Cli::parse_from(["easy-ping", "192.0.2.1"]);
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_use_colors_method() {
        let cli_no_color = Cli::parse_from(["easy-ping", "--no-color", "localhost"]);
        assert!(!cli_no_color.use_colors());

        let cli_color = Cli::parse_from(["easy-ping", "--color", "localhost"]);
        assert!(cli_color.use_colors());
    }


    #[test]
    fn test_long_version_carries_package_version() {
        assert!(long_version().starts_with(env!("CARGO_PKG_VERSION")));
    }
}
