//! Build units of a multi-module project.
//!
//! A [`Project`] is the current unit plus all of its descendants, flattened in
//! discovery order. Each unit is a [`Module`] whose [`ModuleKind`] is decided
//! once, when the module is built from its packaging kind, so the rest of the
//! pipeline never compares packaging strings.
//!
//! The [`collector`] turns a project into a [`ModuleIndex`] holding only the
//! modules that produce report artifacts.

pub mod collector;

pub use collector::{Collection, NothingToDo, collect_modules};

use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::constants::GROUPING_PACKAGING;

/// Whether a unit only groups children or is a real module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    /// Exists only to aggregate child modules; has no report artifacts.
    Grouping,
    /// Produces its own report artifacts.
    Leaf,
}

impl ModuleKind {
    /// Resolve the kind of a unit from its packaging kind.
    #[must_use]
    pub fn from_packaging(packaging: &str) -> Self {
        if packaging == GROUPING_PACKAGING {
            Self::Grouping
        } else {
            Self::Leaf
        }
    }

    /// `true` for [`ModuleKind::Grouping`].
    #[must_use]
    pub fn is_grouping(self) -> bool {
        matches!(self, Self::Grouping)
    }
}

/// One build unit.
///
/// Serialized as-is into the template attribute context, so the field names
/// are part of the template-facing contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Module {
    /// Unique, stable identifier (artifact id).
    pub id: String,
    /// Human-readable name, defaults to the identifier.
    pub name: String,
    /// Packaging kind as declared, kept for display.
    pub packaging: String,
    /// Kind resolved from the packaging.
    pub kind: ModuleKind,
    /// Build-output directory the report artifacts are read from.
    pub build_directory: PathBuf,
    /// Declared version, if any. Serialized as `null` when absent.
    pub version: Option<String>,
    /// Declared description, if any. Serialized as `null` when absent.
    pub description: Option<String>,
}

impl Module {
    /// Create a module; the kind follows from `packaging`.
    pub fn new(
        id: impl Into<String>,
        packaging: impl Into<String>,
        build_directory: impl Into<PathBuf>,
    ) -> Self {
        let id = id.into();
        let packaging = packaging.into();
        Self {
            name: id.clone(),
            kind: ModuleKind::from_packaging(&packaging),
            id,
            packaging,
            build_directory: build_directory.into(),
            version: None,
            description: None,
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Build-output directory.
    pub fn build_directory(&self) -> &Path {
        &self.build_directory
    }
}

/// The current unit and every descendant, in discovery order.
#[derive(Debug, Clone)]
pub struct Project {
    /// The unit the aggregation runs for.
    pub root: Module,
    /// All descendants (children, grandchildren, ...), depth-first.
    pub descendants: Vec<Module>,
}

impl Project {
    /// Create a project from its root and flattened descendants.
    pub fn new(root: Module, descendants: Vec<Module>) -> Self {
        Self {
            root,
            descendants,
        }
    }
}

/// Modules that produce report artifacts, keyed by identifier.
///
/// Iteration order is discovery order. Lookup is by identifier.
#[derive(Debug, Clone, Default)]
pub struct ModuleIndex {
    modules: Vec<Module>,
    positions: HashMap<String, usize>,
}

impl ModuleIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module. Returns `false` (and leaves the index unchanged) if the
    /// identifier is already present.
    pub fn insert(&mut self, module: Module) -> bool {
        if self.positions.contains_key(&module.id) {
            return false;
        }
        self.positions.insert(module.id.clone(), self.modules.len());
        self.modules.push(module);
        true
    }

    /// Look a module up by identifier.
    pub fn get(&self, id: &str) -> Option<&Module> {
        self.positions.get(id).map(|&i| &self.modules[i])
    }

    /// `true` if a module with this identifier is indexed.
    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Modules in discovery order.
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Iterate in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, Module> {
        self.modules.iter()
    }

    /// Identifiers in discovery order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(|m| m.id.as_str())
    }

    /// Number of indexed modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// `true` if no module is indexed.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl<'a> IntoIterator for &'a ModuleIndex {
    type Item = &'a Module;
    type IntoIter = std::slice::Iter<'a, Module>;

    fn into_iter(self) -> Self::IntoIter {
        self.modules.iter()
    }
}

// Exposed to templates as a map keyed by identifier.
impl Serialize for ModuleIndex {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.modules.len()))?;
        for module in &self.modules {
            map.serialize_entry(&module.id, module)?;
        }
        map.end()
    }
}
