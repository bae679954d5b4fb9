//! Per-unit outcomes of an aggregation run.

use std::path::PathBuf;

use crate::project::NothingToDo;

/// What happened to one module, or one matched entry of a module.
#[derive(Debug)]
pub enum CopyOutcome {
    /// `source` was copied into `destination`.
    Copied {
        /// Module identifier
        module: String,
        /// Matched build-output entry
        source: PathBuf,
        /// Per-module directory it was copied into
        destination: PathBuf,
    },
    /// The module had nothing to copy.
    Skipped {
        /// Module identifier
        module: String,
        /// Why nothing was copied
        reason: String,
    },
    /// The module, or one of its entries, could not be copied.
    Failed {
        /// Module identifier
        module: String,
        /// Path the failure is about
        path: PathBuf,
        /// Cause
        error: anyhow::Error,
    },
}

impl CopyOutcome {
    /// Module the outcome belongs to.
    pub fn module(&self) -> &str {
        match self {
            Self::Copied {
                module,
                ..
            }
            | Self::Skipped {
                module,
                ..
            }
            | Self::Failed {
                module,
                ..
            } => module,
        }
    }

    /// `true` for [`CopyOutcome::Failed`].
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// What happened to one template.
#[derive(Debug)]
pub enum RenderOutcome {
    /// The template was rendered and written.
    Written {
        /// Logical template name
        template: String,
        /// File that was written
        path: PathBuf,
    },
    /// The template could not be read, rendered or written.
    Failed {
        /// Logical template name, or the template path if no name is known
        template: String,
        /// Cause, usually an [`AggregatorError`](crate::core::AggregatorError)
        error: anyhow::Error,
    },
}

impl RenderOutcome {
    /// Template the outcome belongs to.
    pub fn template(&self) -> &str {
        match self {
            Self::Written {
                template,
                ..
            }
            | Self::Failed {
                template,
                ..
            } => template,
        }
    }

    /// `true` for [`RenderOutcome::Failed`].
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Everything a completed run did, in processing order.
#[derive(Debug, Default)]
pub struct AggregationReport {
    /// Copy step outcomes; empty when copying is disabled.
    pub copies: Vec<CopyOutcome>,
    /// One outcome per resolved template.
    pub renders: Vec<RenderOutcome>,
}

impl AggregationReport {
    /// `true` if any copy or render failed.
    pub fn has_failures(&self) -> bool {
        self.copies.iter().any(CopyOutcome::is_failure)
            || self.renders.iter().any(RenderOutcome::is_failure)
    }

    /// Number of failed units.
    pub fn failure_count(&self) -> usize {
        self.copies.iter().filter(|o| o.is_failure()).count()
            + self.renders.iter().filter(|o| o.is_failure()).count()
    }

    /// Files written by the render step.
    pub fn written(&self) -> impl Iterator<Item = &PathBuf> {
        self.renders.iter().filter_map(|o| match o {
            RenderOutcome::Written {
                path,
                ..
            } => Some(path),
            RenderOutcome::Failed {
                ..
            } => None,
        })
    }
}

/// Result of [`ReportAggregator::run`](super::ReportAggregator::run).
#[derive(Debug)]
pub enum RunOutcome {
    /// A precondition did not hold; nothing was touched.
    NothingToDo(NothingToDo),
    /// The pipeline ran; see the report for per-unit failures.
    Completed(AggregationReport),
}

impl RunOutcome {
    /// The report, if the pipeline ran.
    pub fn report(&self) -> Option<&AggregationReport> {
        match self {
            Self::Completed(report) => Some(report),
            Self::NothingToDo(_) => None,
        }
    }
}
