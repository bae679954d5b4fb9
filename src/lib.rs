//! report-aggregator - multi-module build report aggregation
//!
//! Aggregates the per-module report artifacts of a multi-module build into a
//! single parent-level report: matching files from each module's build output
//! are copied into `<report root>/<module id>/`, and a set of templates (the
//! built-in index page and stylesheet, or custom ones) is rendered against the
//! collected module data.
//!
//! # Architecture Overview
//!
//! ```text
//! project file ──> Project ──> collect_modules ──> ModuleIndex
//!                                                     │
//!                       ┌─────────────────────────────┤
//!                       ▼                             ▼
//!                FileAggregator               resolve_templates
//!             (<root>/<id>/<entry>)                   │
//!                                          TemplateEngine::render
//!                                                     │
//!                                               write_output
//! ```
//!
//! Every module and every template gets its own outcome; one failure never
//! stops the others (see [`aggregate::AggregationReport`]).
//!
//! # Core Modules
//!
//! - [`project`] - Modules, grouping units and module collection
//! - [`aggregate`] - The pipeline and the file copy step
//! - [`templating`] - Template resolution, attribute context and the Tera engine
//! - [`config`] - Project file loading and the validated run configuration
//! - [`core`] - Error types and user-facing error formatting
//!
//! ## Supporting Modules
//! - [`cli`] - The `report-aggregator` command line
//! - [`utils`] - File system helpers (atomic writes, recursive copy, path checks)
//! - [`constants`] - Defaults shared across modules
//!
//! # Example
//!
//! ```rust,no_run
//! use report_aggregator::aggregate::{ReportAggregator, RunOutcome};
//! use report_aggregator::config::{AggregateConfig, load_project_file};
//! use report_aggregator::templating::TeraEngine;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let (project, settings) = load_project_file(Path::new("aggregator.toml"))?;
//! let config = AggregateConfig::from_settings(settings, project.root.build_directory())?;
//!
//! match ReportAggregator::new(config, TeraEngine::new()).run(&project) {
//!     RunOutcome::Completed(report) if report.has_failures() => eprintln!("partial report"),
//!     RunOutcome::Completed(_) => println!("done"),
//!     RunOutcome::NothingToDo(reason) => println!("nothing to do: {reason}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod project;
pub mod templating;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
