//! Test utilities for report-aggregator
//!
//! Helpers shared by unit and integration tests: a builder for multi-module
//! projects in temporary directories, and one-time log initialization.
//!
//! # Example
//!
//! ```rust,no_run
//! use report_aggregator::test_utils::TestProject;
//!
//! let project = TestProject::builder()
//!     .unwrap()
//!     .with_module("core", "jar")
//!     .with_setting("copy_pattern", "\"pit-reports\"")
//!     .build()
//!     .unwrap();
//! assert!(project.file_exists("aggregator.toml"));
//! ```

pub mod builder;

pub use builder::{TestProject, TestProjectBuilder};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Installs a test-writer subscriber once per process. Uses `level` when
/// given, otherwise `RUST_LOG`; with neither, logging stays off.
///
/// ```rust,no_run
/// use tracing::Level;
///
/// report_aggregator::test_utils::init_test_logging(Some(Level::DEBUG));
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
