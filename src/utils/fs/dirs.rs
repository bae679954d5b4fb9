//! Directory operations for creating and copying directory trees.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Ensures a directory exists, creating it and all parent directories if necessary.
///
/// An existing directory is left untouched, so repeated calls are cheap and
/// never clear content written by an earlier run.
///
/// # Errors
///
/// - the path exists but is not a directory
/// - creation fails (permissions, invalid path)
///
/// # Examples
///
/// ```rust,no_run
/// use report_aggregator::utils::fs::ensure_dir;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// ensure_dir(Path::new("target/report/core"))?;
/// # Ok(())
/// # }
/// ```
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    } else if !path.is_dir() {
        return Err(anyhow::anyhow!("Path exists but is not a directory: {}", path.display()));
    }
    Ok(())
}

/// Ensures that the parent directory of a file path exists.
///
/// Paths without a parent (or with an empty one, like `index.html`) need
/// nothing created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}

/// Recursively copies the contents of `src` into `dst`.
///
/// - Creates `dst` (and missing sub-directories) as needed
/// - Overwrites existing files in the destination
/// - Copies only regular files; symlinks and special files are skipped
pub fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    ensure_dir(dst)?;

    for entry in WalkDir::new(src).min_depth(1).follow_links(false) {
        let entry =
            entry.with_context(|| format!("Failed to read directory: {}", src.display()))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .with_context(|| format!("Unexpected entry outside {}", src.display()))?;
        let target = dst.join(relative);

        let file_type = entry.file_type();
        if file_type.is_dir() {
            ensure_dir(&target)?;
        } else if file_type.is_file() {
            fs::copy(entry.path(), &target).with_context(|| {
                format!(
                    "Failed to copy file from {} to {}",
                    entry.path().display(),
                    target.display()
                )
            })?;
        }
    }

    Ok(())
}

/// Copies a file or a directory tree *into* `dst_dir`, keeping its own name.
///
/// `core/target/pit-reports` copied into `report/core` ends up as
/// `report/core/pit-reports/...`; a file `core/target/report.xml` ends up as
/// `report/core/report.xml`.
///
/// # Errors
///
/// Fails if `src` has no file name, cannot be inspected, or any copy fails.
pub fn copy_entry(src: &Path, dst_dir: &Path) -> Result<()> {
    let name = src
        .file_name()
        .with_context(|| format!("Cannot copy a path without a file name: {}", src.display()))?;
    let target = dst_dir.join(name);

    let metadata = fs::symlink_metadata(src)
        .with_context(|| format!("Failed to inspect {}", src.display()))?;

    if metadata.is_dir() {
        copy_dir(src, &target)
    } else if metadata.is_file() {
        ensure_dir(dst_dir)?;
        fs::copy(src, &target).with_context(|| {
            format!("Failed to copy file from {} to {}", src.display(), target.display())
        })?;
        Ok(())
    } else {
        tracing::debug!("Skipping {}: not a regular file or directory", src.display());
        Ok(())
    }
}
