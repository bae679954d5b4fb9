//! Integration test suite for report-aggregator
//!
//! End-to-end tests running the pipeline against real module trees built in
//! temporary directories, and the binary through `assert_cmd`.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **aggregation**: module collection and the file copy step
//! - **templates**: built-in, single-file and directory templates, tolerant rendering
//! - **cli**: the `aggregate` and `validate` commands

use report_aggregator::aggregate::{ReportAggregator, RunOutcome};
use report_aggregator::config::AggregateConfig;
use report_aggregator::templating::TeraEngine;
use report_aggregator::test_utils::{TestProject, init_test_logging};

mod aggregation;
mod cli;
mod templates;

/// Load `project` and run the pipeline with the Tera engine.
pub fn run(project: &TestProject) -> RunOutcome {
    init_test_logging(None);
    let (loaded, settings) = project.load().unwrap();
    let config = AggregateConfig::from_settings(settings, loaded.root.build_directory()).unwrap();
    ReportAggregator::new(config, TeraEngine::new()).run(&loaded)
}
