//! Easy Ping - Main CLI Application
//!
//! Probes one host continuously until interrupted, then prints loss and
//! round-trip statistics.

use clap::Parser;
use easy_ping::{app::App, cli::Cli, error::AppError};
use std::{error::Error, process};

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(99);
    }));

    let cli = Cli::parse();
    let use_color = cli.use_colors();

    // --color forces escapes even when stdout is not a terminal
    if cli.color {
        colored::control::set_override(true);
    } else if cli.no_color {
        colored::control::set_override(false);
    }

    let result = match App::from_cli(cli) {
        Ok(app) => app.run().await,
        Err(e) => Err(e),
    };

    match result {
        // Interrupted after printing the statistics block
        Ok(_) => process::exit(0),
        Err(e) => {
            eprintln!("{}", e.format_for_console(use_color));

            if let Some(source) = e.source() {
                eprintln!("Caused by: {}", source);
            }

            print_error_suggestions(&e);

            process::exit(e.exit_code());
        }
    }
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Config(_) | AppError::Validation(_) => {
            eprintln!();
            eprintln!("Usage: easy-ping [OPTIONS] <HOST>");
            eprintln!("  - Check your .env file and PING_* environment variables");
            eprintln!("  - --net accepts ip, ip4, ip6, tcp, tcp4 or tcp6");
            eprintln!("  - Run 'easy-ping --help' for all options");
        }
        AppError::DnsResolution(_) => {
            eprintln!();
            eprintln!("DNS resolution help:");
            eprintln!("  - Check that the host name is spelled correctly");
            eprintln!("  - Pass an IP address directly to skip DNS");
            eprintln!("  - Drop --net if the host only has addresses of the other family");
        }
        AppError::Network(_) => {
            eprintln!();
            eprintln!("Network troubleshooting:");
            eprintln!("  - Check your network connection");
            eprintln!("  - Verify firewall settings");
        }
        _ => {}
    }
}
