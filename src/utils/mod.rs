//! Cross-platform utilities and helpers
//!
//! # Modules
//!
//! - [`fs`] - File system operations: directory creation, recursive copies,
//!   atomic writes and path validation

pub mod fs;

pub use fs::{atomic_write, copy_dir, ensure_dir, normalize_path, write_output};
