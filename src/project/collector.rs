//! Module collection.
//!
//! Walks every descendant of the current unit and keeps the ones that
//! produce report artifacts. Grouping units are skipped. Collection is pure:
//! it touches neither the file system nor the destination tree.

use tracing::debug;

use super::{ModuleIndex, Project};

/// Why a run has nothing to aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NothingToDo {
    /// The current unit is a leaf module, not a grouping unit.
    NotAGroupingUnit,
    /// The current unit has no descendants.
    NoModules,
}

impl std::fmt::Display for NothingToDo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAGroupingUnit => write!(f, "current unit is not a grouping unit"),
            Self::NoModules => write!(f, "current unit has no modules"),
        }
    }
}

/// Result of [`collect_modules`].
#[derive(Debug, Clone)]
pub enum Collection {
    /// Modules to aggregate (possibly empty if every descendant is a grouping unit).
    Modules(ModuleIndex),
    /// The pipeline should stop without producing output.
    NothingToDo(NothingToDo),
}

/// Build the [`ModuleIndex`] for a project.
///
/// Every descendant whose kind is grouping is excluded; every other
/// descendant is included exactly once, keyed by identifier, in discovery
/// order. A repeated identifier keeps its first occurrence.
pub fn collect_modules(project: &Project) -> Collection {
    if !project.root.kind.is_grouping() {
        debug!("{} is not a grouping unit ({}): nothing to aggregate", project.root.id, project.root.packaging);
        return Collection::NothingToDo(NothingToDo::NotAGroupingUnit);
    }
    if project.descendants.is_empty() {
        debug!("{} has no modules: nothing to aggregate", project.root.id);
        return Collection::NothingToDo(NothingToDo::NoModules);
    }

    let mut index = ModuleIndex::new();
    for module in &project.descendants {
        if module.kind.is_grouping() {
            debug!("Skipping grouping unit {}", module.id);
            continue;
        }
        if !index.insert(module.clone()) {
            debug!("Module {} already collected, keeping the first occurrence", module.id);
        }
    }

    debug!("Collected {} module(s) under {}", index.len(), project.root.id);
    Collection::Modules(index)
}
