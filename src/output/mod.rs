//! Output formatting and display system
//!
//! Formatters turn probe outcomes and statistics into text; the
//! [`Reporter`] writes that text to the report stream (stdout in the binary).

mod colored;
mod formatter;

pub use colored::{ColorScheme, ColoredFormatter};
pub use formatter::{OutputFormatter, PlainFormatter};

use crate::{
    error::Result,
    models::{ProbeOutcome, Target},
    stats::ProbeStats,
};
use std::io::Write;

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter based on color support
    pub fn create_formatter(enable_color: bool) -> Box<dyn OutputFormatter> {
        if enable_color {
            Box::new(ColoredFormatter::new())
        } else {
            Box::new(PlainFormatter::new())
        }
    }

    /// Create a plain text formatter for scripts/logs
    pub fn create_plain_formatter() -> Box<dyn OutputFormatter> {
        Self::create_formatter(false)
    }
}

/// Writes formatted probe output for one target
pub struct Reporter<W: Write> {
    formatter: Box<dyn OutputFormatter>,
    target: Target,
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(formatter: Box<dyn OutputFormatter>, target: Target, out: W) -> Self {
        Self {
            formatter,
            target,
            out,
        }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn banner(&mut self, port: u16) -> Result<()> {
        let line = self.formatter.format_banner(&self.target, port);
        self.emit(&line)
    }

    pub fn probe(&mut self, outcome: &ProbeOutcome, stats: &ProbeStats) -> Result<()> {
        let line = self.formatter.format_probe(&self.target, outcome, stats);
        self.emit(&line)
    }

    pub fn summary(&mut self, stats: &ProbeStats) -> Result<()> {
        let block = self.formatter.format_summary(&self.target, stats);
        self.emit(&block)
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()?;
        Ok(())
    }
}
