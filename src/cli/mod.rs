//! Command-line interface for report-aggregator.
//!
//! # Commands
//!
//! - `aggregate` - Copy module reports and render the report templates
//! - `validate` - Check the project file and templates without writing anything
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug output
//! - `--quiet` - Suppress all output except errors
//!
//! `RUST_LOG`, when set, takes precedence over both.
//!
//! # Examples
//!
//! ```bash
//! report-aggregator aggregate
//! report-aggregator --verbose aggregate --project parent/aggregator.toml
//! report-aggregator validate --format json
//! ```

pub mod aggregate;
pub mod common;
pub mod validate;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use aggregate::AggregateCommand;
pub use common::ProjectArgs;
pub use validate::ValidateCommand;

/// Settings derived from the global flags, applied before a command runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: String,
    /// Whether command output other than errors is suppressed.
    pub quiet: bool,
}

/// Aggregate per-module build reports into one report.
#[derive(Parser, Debug)]
#[command(
    name = "report-aggregator",
    about = "Aggregate per-module build reports into a single parent-level report",
    version,
    author
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Copy module reports and render the report templates
    Aggregate(AggregateCommand),
    /// Check the project file and templates without writing anything
    Validate(ValidateCommand),
}

impl Cli {
    /// Translate the global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };

        CliConfig {
            log_level: log_level.to_string(),
            quiet: self.quiet,
        }
    }

    /// Run the selected command.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(&config)
    }

    /// Run the selected command with an explicit configuration.
    pub fn execute_with_config(self, config: &CliConfig) -> Result<()> {
        match self.command {
            Commands::Aggregate(cmd) => cmd.execute(config.quiet),
            Commands::Validate(cmd) => cmd.execute(config.quiet),
        }
    }
}
