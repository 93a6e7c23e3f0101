//! Environment variable handling and .env file management

use crate::error::{AppError, ErrorContext, Result};
use crate::types::NetworkPreference;
use std::path::Path;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load a specific env file if it exists.
    ///
    /// Variables already set in the process environment win over the file.
    pub fn load_env_file_from(path: &Path, debug: bool) -> Result<()> {
        if path.exists() {
            dotenv::from_path(path).with_context(|| format!("Failed to load {}", path.display()))?;

            if debug {
                eprintln!("Loaded configuration from {}", path.display());
            }
        } else if debug {
            eprintln!("No {} file found, using defaults and CLI arguments", path.display());
        }

        Ok(())
    }

    /// Validate environment variable format before parsing
    pub fn validate_env_var(key: &str, value: &str) -> Result<()> {
        match key {
            "PING_TIMEOUT_SECONDS" => {
                let timeout: u64 = value.parse()
                    .map_err(|e| AppError::config(format!("Invalid PING_TIMEOUT_SECONDS value '{}': {}", value, e)))?;
                if timeout == 0 || timeout > crate::defaults::MAX_TIMEOUT_SECS {
                    return Err(AppError::config(format!(
                        "PING_TIMEOUT_SECONDS must be between 1 and {}, got: {}",
                        crate::defaults::MAX_TIMEOUT_SECS, timeout
                    )));
                }
            }
            "PING_NETWORK" => {
                value.trim().parse::<NetworkPreference>()?;
            }
            "PING_PORT" => {
                let port: u16 = value.parse()
                    .map_err(|e| AppError::config(format!("Invalid PING_PORT value '{}': {}", value, e)))?;
                if port == 0 {
                    return Err(AppError::config("PING_PORT must be between 1 and 65535, got: 0"));
                }
            }
            "PING_INTERVAL_MS" => {
                let interval: u64 = value.parse()
                    .map_err(|e| AppError::config(format!("Invalid PING_INTERVAL_MS value '{}': {}", value, e)))?;
                if interval > crate::defaults::MAX_INTERVAL_MS {
                    return Err(AppError::config(format!(
                        "PING_INTERVAL_MS cannot exceed {}, got: {}",
                        crate::defaults::MAX_INTERVAL_MS, interval
                    )));
                }
            }
            "ENABLE_COLOR" => {
                value.parse::<bool>()
                    .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", value, e)))?;
            }
            _ => {}
        }

        Ok(())
    }

    /// Names of every variable the configuration reads
    pub fn supported_env_vars() -> &'static [&'static str] {
        &[
            "PING_TIMEOUT_SECONDS",
            "PING_NETWORK",
            "PING_PORT",
            "PING_INTERVAL_MS",
            "ENABLE_COLOR",
        ]
    }

    /// Validate all currently set environment variables
    pub fn validate_current_env() -> Vec<String> {
        Self::supported_env_vars()
            .iter()
            .filter_map(|var_name| {
                let value = std::env::var(var_name).ok()?;
                Self::validate_env_var(var_name, &value)
                    .err()
                    .map(|e| format!("Warning: {}", e))
            })
            .collect()
    }
}
