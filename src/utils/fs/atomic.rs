//! Atomic file write operations.
//!
//! Content is written to a temporary file in the destination's own directory
//! and renamed over the destination. Readers never observe a half-written
//! file, and an existing file is always replaced as a whole.

use crate::utils::fs::dirs::ensure_parent_dir;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes bytes to a file atomically, creating missing parent directories.
///
/// The temporary file handle is owned by a [`NamedTempFile`]: it is closed
/// and removed on every early return, and only survives as the destination
/// once the rename succeeds.
///
/// # Errors
///
/// - parent directory creation fails
/// - the temporary file cannot be created, written or synced
/// - the rename onto `path` fails
///
/// # Examples
///
/// ```rust,no_run
/// use report_aggregator::utils::fs::atomic_write;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// atomic_write(Path::new("target/report/style.css"), b"body {}")?;
/// # Ok(())
/// # }
/// ```
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    ensure_parent_dir(path)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in: {}", dir.display()))?;

    temp.write_all(content)
        .with_context(|| format!("Failed to write to temp file for: {}", path.display()))?;
    temp.as_file().sync_all().with_context(|| "Failed to sync file to disk")?;

    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    Ok(())
}

/// Writes rendered text to `path`, replacing whatever was there.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}
