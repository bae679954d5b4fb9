//! report-aggregator CLI entry point
//!
//! Parses the command line, installs the log subscriber, runs the command
//! and prints failures with their suggestions.

use clap::Parser;
use report_aggregator::cli::Cli;
use report_aggregator::core::user_friendly_error;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    let config = cli.build_config();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli.execute_with_config(&config) {
        let error_ctx = user_friendly_error(e);
        error_ctx.display();
        std::process::exit(1);
    }
}
