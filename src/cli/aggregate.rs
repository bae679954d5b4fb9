//! The `aggregate` command: run the pipeline and print a summary.
//!
//! ```bash
//! report-aggregator aggregate
//! report-aggregator aggregate --project build/aggregator.toml --copy-pattern pit-reports
//! report-aggregator aggregate --templates src/report-templates --no-default-templates
//! report-aggregator aggregate --strict   # exit code 1 on any per-module or per-template failure
//! ```

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;

use super::common::ProjectArgs;
use crate::aggregate::{AggregationReport, CopyOutcome, RenderOutcome, ReportAggregator, RunOutcome};
use crate::templating::TeraEngine;

/// Copy module reports and render the report templates.
#[derive(Args, Debug, Clone, Default)]
pub struct AggregateCommand {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Fail if any module or template failed
    #[arg(long, env = "REPORT_AGGREGATOR_STRICT")]
    pub strict: bool,
}

impl AggregateCommand {
    /// Run the command.
    pub fn execute(self, quiet: bool) -> Result<()> {
        let (project, config) = self.project.load()?;
        let destination = config.destination_root().to_path_buf();
        let aggregator = ReportAggregator::new(config, TeraEngine::new());

        let report = match aggregator.run(&project) {
            RunOutcome::NothingToDo(reason) => {
                if !quiet {
                    println!("{} Nothing to aggregate: {}", "-".dimmed(), reason);
                }
                return Ok(());
            }
            RunOutcome::Completed(report) => report,
        };

        if !quiet {
            print_report(&report);
            println!("\nReport written to {}", destination.display().to_string().bold());
        }

        if self.strict && report.has_failures() {
            bail!("{} unit(s) failed", report.failure_count());
        }
        Ok(())
    }
}

fn print_report(report: &AggregationReport) {
    if !report.copies.is_empty() {
        println!("{}", "Modules".bold());
    }
    for outcome in &report.copies {
        match outcome {
            CopyOutcome::Copied {
                module,
                source,
                ..
            } => {
                let name = source.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
                println!("  {} {} {}", "✓".green(), module, name.dimmed());
            }
            CopyOutcome::Skipped {
                module,
                reason,
            } => println!("  {} {} {}", "-".yellow(), module, reason.dimmed()),
            CopyOutcome::Failed {
                module,
                error,
                ..
            } => println!("  {} {} {:#}", "✗".red(), module, error),
        }
    }

    if !report.renders.is_empty() {
        println!("{}", "Templates".bold());
    }
    for outcome in &report.renders {
        match outcome {
            RenderOutcome::Written {
                template,
                path,
            } => println!("  {} {} -> {}", "✓".green(), template, path.display()),
            RenderOutcome::Failed {
                template,
                error,
            } => println!("  {} {} {:#}", "✗".red(), template, error),
        }
    }

    if report.has_failures() {
        println!("\n{} {} failure(s)", "⚠".yellow(), report.failure_count());
    }
}
