//! File system utilities for cross-platform file operations
//!
//! Every operation the pipeline performs on disk goes through this module:
//!
//! - **Directories**: idempotent creation and recursive copies ([`dirs`])
//! - **Writes**: rendered output written through a temporary sibling file and
//!   renamed into place ([`atomic`])
//! - **Paths**: logical normalization and containment checks ([`paths`])
//!
//! # Examples
//!
//! ```rust,no_run
//! use report_aggregator::utils::fs::{copy_entry, ensure_dir, write_output};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! ensure_dir(Path::new("target/report/core"))?;
//! copy_entry(Path::new("core/target/pit-reports"), Path::new("target/report/core"))?;
//! write_output(Path::new("target/report/index.html"), "<html></html>")?;
//! # Ok(())
//! # }
//! ```

pub mod atomic;
pub mod dirs;
pub mod paths;

pub use atomic::{atomic_write, write_output};
pub use dirs::{copy_dir, copy_entry, ensure_dir, ensure_parent_dir};
pub use paths::{is_safe_path, normalize_path};
