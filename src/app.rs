//! Main application orchestration and execution

use crate::{
    cli::Cli,
    config::{display_config_summary, load_config, validate_config, EnvManager, ValidationLevel},
    dns::AddressResolver,
    error::{ErrorContext, Result},
    log_debug, log_info,
    logging::{LoggerFactory, NetworkLogger},
    models::{Config, Target},
    output::{OutputFormatterFactory, Reporter},
    prober::TcpProber,
    scheduler::{shutdown_signal, ProbeScheduler, ProbeSettings},
    stats::ProbeStats,
};
use std::future::Future;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Instant;

/// Main application struct that coordinates all components
pub struct App {
    config: Config,
    loggers: LoggerFactory,
}

impl App {
    /// Create a new application instance from a validated configuration
    pub fn new(config: Config) -> Self {
        let loggers = LoggerFactory::new(config.clone());
        Self { config, loggers }
    }

    /// Build the configuration from CLI arguments, `.env` and the environment
    pub fn from_cli(cli: Cli) -> Result<Self> {
        Ok(Self::new(load_config(cli)?))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Probe until Ctrl-C or SIGTERM, reporting to stdout
    pub async fn run(self) -> Result<ProbeStats> {
        self.run_with(io::stdout(), shutdown_signal()).await
    }

    /// Resolve, print the banner, then probe until `shutdown` resolves.
    ///
    /// Returns the statistics printed in the final block.
    pub async fn run_with<W, F>(self, out: W, shutdown: F) -> Result<ProbeStats>
    where
        W: Write,
        F: Future<Output = ()>,
    {
        let net_logger = Arc::new(self.loggers.create_network_logger().await);
        let error_logger = self.loggers.create_error_logger().await;

        self.report_configuration();

        let target = match self.resolve_target(&net_logger).await {
            Ok(target) => target,
            Err(e) => {
                error_logger.log_error(&e, Some("Resolution")).await;
                return Err(e);
            }
        };

        let settings = ProbeSettings {
            timeout: self.config.timeout(),
            interval: self.config.interval(),
        };
        log_info!(net_logger.logger(), "Probing {} on tcp port {}", target, self.config.port);
        log_debug!(
            net_logger.logger(),
            "Probe timeout {:?}, interval {:?}",
            settings.timeout,
            settings.interval
        );

        let formatter = OutputFormatterFactory::create_formatter(self.config.enable_color);
        let mut reporter = Reporter::new(formatter, target.clone(), out);
        reporter.banner(self.config.port).context("Writing banner")?;

        let prober = Arc::new(TcpProber::new(self.config.port));
        let scheduler = ProbeScheduler::new(target, settings, prober).with_logger(Arc::clone(&net_logger));

        let stats = scheduler.run_until(&mut reporter, shutdown).await?;
        net_logger.log_shutdown(&stats).await;

        Ok(stats)
    }

    /// Resolve the configured host once, honouring the network override
    pub async fn resolve_target(&self, logger: &NetworkLogger) -> Result<Target> {
        let resolver = AddressResolver::new(self.config.network_preference()?);
        let started = Instant::now();
        let result = resolver.resolve(&self.config.host).await;
        let duration_ms = started.elapsed().as_secs_f64() * 1000.0;

        logger
            .log_resolution(&self.config.host, result.as_ref().ok(), duration_ms)
            .await;
        result
    }

    /// Print configuration diagnostics to stderr
    fn report_configuration(&self) {
        if self.config.debug {
            eprintln!("{} v{}", crate::PKG_NAME, crate::VERSION);
            eprintln!("Configuration Summary:");
            eprintln!("{}", display_config_summary(&self.config));
            for warning in EnvManager::validate_current_env() {
                eprintln!("{}", warning);
            }
        }

        let warnings = match validate_config(&self.config) {
            Ok(warnings) => warnings,
            // Already validated when the config was loaded
            Err(_) => return,
        };

        let show_all = self.config.verbose || self.config.debug;
        for warning in warnings
            .iter()
            .filter(|w| show_all || w.level == ValidationLevel::Error)
        {
            eprintln!("{}", warning.format(self.config.enable_color));
        }
    }
}
