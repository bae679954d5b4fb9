//! Copying module report files into the aggregated report.

use anyhow::Context;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::outcome::CopyOutcome;
use crate::core::AggregatorError;
use crate::project::{Module, ModuleIndex};
use crate::utils::fs::{copy_entry, ensure_dir};

/// File-name filter selecting the build-output entries to copy.
///
/// The expression must match the *whole* entry name: `pit-reports` selects
/// `pit-reports` but not `old-pit-reports`.
#[derive(Debug, Clone)]
pub struct CopyRule {
    pattern: String,
    regex: Regex,
}

impl CopyRule {
    /// Compile a rule.
    ///
    /// # Errors
    ///
    /// [`AggregatorError::InvalidCopyPattern`] if `pattern` is not a valid
    /// regular expression.
    pub fn new(pattern: &str) -> Result<Self, AggregatorError> {
        let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|e| {
            AggregatorError::InvalidCopyPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as configured.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// `true` if `name` is selected.
    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

/// Copies matching build-output entries of every module into
/// `<destination root>/<module id>/`.
///
/// The per-module directory is created when absent and never cleared, so
/// running twice leaves the same tree. Each module and each matched entry
/// is handled independently: a failure is recorded and the rest continues.
#[derive(Debug, Clone)]
pub struct FileAggregator {
    rule: CopyRule,
    destination_root: PathBuf,
}

impl FileAggregator {
    /// Create an aggregator writing under `destination_root`.
    pub fn new(rule: CopyRule, destination_root: impl Into<PathBuf>) -> Self {
        Self {
            rule,
            destination_root: destination_root.into(),
        }
    }

    /// Directory receiving the files of `module`.
    pub fn module_destination(&self, module: &Module) -> PathBuf {
        self.destination_root.join(&module.id)
    }

    /// Copy the files of every module, in index order.
    pub fn aggregate(&self, index: &ModuleIndex) -> Vec<CopyOutcome> {
        let mut outcomes = Vec::new();
        for module in index {
            self.aggregate_module(module, &mut outcomes);
        }
        outcomes
    }

    fn aggregate_module(&self, module: &Module, outcomes: &mut Vec<CopyOutcome>) {
        let destination = self.module_destination(module);
        if let Err(error) = ensure_dir(&destination) {
            warn!("Cannot create {} for module {}: {:#}", destination.display(), module.id, error);
            outcomes.push(CopyOutcome::Failed {
                module: module.id.clone(),
                path: destination,
                error,
            });
            return;
        }

        let build_directory = module.build_directory();
        if !build_directory.exists() {
            debug!("Module {} has no build output at {}", module.id, build_directory.display());
            outcomes.push(CopyOutcome::Skipped {
                module: module.id.clone(),
                reason: format!("no build output at {}", build_directory.display()),
            });
            return;
        }

        let entries = match self.matching_entries(build_directory) {
            Ok(entries) => entries,
            Err(error) => {
                warn!("Cannot list build output of module {}: {:#}", module.id, error);
                outcomes.push(CopyOutcome::Failed {
                    module: module.id.clone(),
                    path: build_directory.to_path_buf(),
                    error,
                });
                return;
            }
        };

        if entries.is_empty() {
            debug!("No entry of {} matches '{}'", build_directory.display(), self.rule.as_str());
        }

        for entry in entries {
            debug!("Copying {} into {}", entry.display(), destination.display());
            let outcome = match copy_entry(&entry, &destination) {
                Ok(()) => CopyOutcome::Copied {
                    module: module.id.clone(),
                    source: entry,
                    destination: destination.clone(),
                },
                Err(error) => {
                    warn!("Failed to copy {} for module {}: {:#}", entry.display(), module.id, error);
                    CopyOutcome::Failed {
                        module: module.id.clone(),
                        path: entry,
                        error,
                    }
                }
            };
            outcomes.push(outcome);
        }
    }

    /// Entries of `dir` selected by the rule, sorted by name.
    fn matching_entries(&self, dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in
            fs::read_dir(dir).with_context(|| format!("Failed to read directory: {}", dir.display()))?
        {
            let entry = entry.with_context(|| format!("Failed to read entry in: {}", dir.display()))?;
            if self.rule.matches(&entry.file_name().to_string_lossy()) {
                entries.push(entry.path());
            }
        }
        entries.sort();
        Ok(entries)
    }
}
