//! Project file loading.
//!
//! The project file describes the module tree the way a build tool would
//! hand it over (identifier, packaging kind, build-output directory, nested
//! children) and carries the `[aggregate]` settings table.
//!
//! Relative paths are resolved against the directory that contains the
//! project file:
//!
//! - an explicit `build_directory` is joined onto that directory
//! - a missing `build_directory` defaults to `<module dir>/target`, where the
//!   root's module dir is the project file's directory and a child's module
//!   dir is `<parent module dir>/<id>`
//! - `destination` and `templates` in `[aggregate]` are joined onto it
//!
//! Example error output:
//! ```text
//! error: Invalid project file aggregator.toml: missing field `id`
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::Settings;
use crate::constants::DEFAULT_BUILD_DIRECTORY;
use crate::core::AggregatorError;
use crate::project::{Module, Project};

/// Parse a TOML file into any deserializable type.
///
/// # Errors
///
/// - [`AggregatorError::ProjectFileNotFound`] if the file does not exist
/// - [`AggregatorError::ProjectFileParse`] if it is not valid for `T`
/// - an IO error with the path as context for any other read failure
pub fn parse_config<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AggregatorError::ProjectFileNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read config file: {}", path.display()));
        }
    };

    toml::from_str(&content).map_err(|e| {
        AggregatorError::ProjectFileParse {
            file: path.to_path_buf(),
            reason: e.message().to_string(),
        }
        .into()
    })
}

/// Contents of a project file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectFile {
    /// The current unit and its module tree.
    pub project: ModuleDescriptor,
    /// Aggregation settings.
    #[serde(default)]
    pub aggregate: Settings,
}

/// One build unit as declared in the project file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleDescriptor {
    /// Unique identifier.
    pub id: String,
    /// Packaging kind; `"pom"` marks a grouping unit.
    #[serde(default = "default_packaging")]
    pub packaging: String,
    /// Build-output directory.
    pub build_directory: Option<PathBuf>,
    /// Display name.
    pub name: Option<String>,
    /// Version.
    pub version: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Child units.
    #[serde(default)]
    pub modules: Vec<ModuleDescriptor>,
}

fn default_packaging() -> String {
    "jar".to_string()
}

impl ModuleDescriptor {
    fn to_module(&self, base: &Path, module_dir: &Path) -> Module {
        let build_directory = match &self.build_directory {
            Some(dir) => base.join(dir),
            None => module_dir.join(DEFAULT_BUILD_DIRECTORY),
        };

        let mut module = Module::new(&self.id, &self.packaging, build_directory);
        if let Some(name) = &self.name {
            module = module.with_name(name);
        }
        if let Some(version) = &self.version {
            module = module.with_version(version);
        }
        if let Some(description) = &self.description {
            module = module.with_description(description);
        }
        module
    }
}

impl ProjectFile {
    /// Parse a project file from a string.
    ///
    /// `file` is only used for error messages.
    pub fn from_toml(content: &str, file: &Path) -> Result<Self, AggregatorError> {
        toml::from_str(content).map_err(|e| AggregatorError::ProjectFileParse {
            file: file.to_path_buf(),
            reason: e.message().to_string(),
        })
    }

    /// Turn the descriptor tree into a [`Project`] and path-resolved [`Settings`].
    ///
    /// Descendants are flattened depth-first in declaration order.
    ///
    /// # Errors
    ///
    /// [`AggregatorError::DuplicateModule`] if two units share an identifier.
    pub fn into_project(self, base: &Path) -> Result<(Project, Settings), AggregatorError> {
        let mut seen = HashSet::new();
        seen.insert(self.project.id.clone());

        let root = self.project.to_module(base, base);
        let mut descendants = Vec::new();
        flatten(&self.project.modules, base, base, &mut seen, &mut descendants)?;

        debug!("Loaded project {} with {} descendant(s)", root.id, descendants.len());
        Ok((Project::new(root, descendants), self.aggregate.resolve_paths(base)))
    }
}

fn flatten(
    children: &[ModuleDescriptor],
    base: &Path,
    parent_dir: &Path,
    seen: &mut HashSet<String>,
    out: &mut Vec<Module>,
) -> Result<(), AggregatorError> {
    for child in children {
        if !seen.insert(child.id.clone()) {
            return Err(AggregatorError::DuplicateModule {
                id: child.id.clone(),
            });
        }
        let module_dir = parent_dir.join(&child.id);
        out.push(child.to_module(base, &module_dir));
        flatten(&child.modules, base, &module_dir, seen, out)?;
    }
    Ok(())
}

/// Load a project file from disk.
///
/// Returns the project and the `[aggregate]` settings with paths resolved
/// against the file's directory.
pub fn load_project_file(path: &Path) -> Result<(Project, Settings)> {
    let file: ProjectFile = parse_config(path)?;
    let base = path.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
    let base = if base.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        base
    };
    Ok(file.into_project(&base)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ModuleKind;
    use tempfile::TempDir;

    const PROJECT: &str = r#"
[project]
id = "parent"
packaging = "pom"

[[project.modules]]
id = "core"
build_directory = "core/build"
version = "1.0.0"

[[project.modules]]
id = "services"
packaging = "pom"

[[project.modules.modules]]
id = "api"
packaging = "war"

[aggregate]
copy_pattern = "pit-reports"
templates = "report-templates"
"#;

    #[test]
    fn test_tree_is_flattened_depth_first() {
        let file = ProjectFile::from_toml(PROJECT, Path::new("aggregator.toml")).unwrap();
        let (project, settings) = file.into_project(Path::new("/work")).unwrap();

        assert_eq!(project.root.id, "parent");
        assert_eq!(project.root.kind, ModuleKind::Grouping);
        assert_eq!(project.root.build_directory, PathBuf::from("/work/target"));

        let ids: Vec<_> = project.descendants.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["core", "services", "api"]);

        assert_eq!(project.descendants[0].build_directory, PathBuf::from("/work/core/build"));
        assert_eq!(project.descendants[0].packaging, "jar");
        assert_eq!(project.descendants[0].version.as_deref(), Some("1.0.0"));
        assert_eq!(
            project.descendants[2].build_directory,
            PathBuf::from("/work/services/api/target")
        );

        assert_eq!(settings.copy_pattern.as_deref(), Some("pit-reports"));
        assert_eq!(settings.templates, Some(PathBuf::from("/work/report-templates")));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let content = r#"
[project]
id = "parent"
packaging = "pom"

[[project.modules]]
id = "core"

[[project.modules]]
id = "core"
"#;
        let file = ProjectFile::from_toml(content, Path::new("aggregator.toml")).unwrap();
        let err = file.into_project(Path::new(".")).unwrap_err();
        assert!(matches!(err, AggregatorError::DuplicateModule { ref id } if id == "core"));
    }

    #[test]
    fn test_unknown_setting_is_a_parse_error() {
        let content = "[project]\nid = \"p\"\n[aggregate]\ncopy_patern = \"x\"\n";
        let err = ProjectFile::from_toml(content, Path::new("aggregator.toml")).unwrap_err();
        assert!(matches!(err, AggregatorError::ProjectFileParse { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = load_project_file(&temp.path().join("aggregator.toml")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AggregatorError>(),
            Some(AggregatorError::ProjectFileNotFound { .. })
        ));
    }

    #[test]
    fn test_load_resolves_against_file_directory() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("aggregator.toml");
        std::fs::write(&path, PROJECT).unwrap();

        let (project, _) = load_project_file(&path).unwrap();
        assert_eq!(project.root.build_directory, temp.path().join("target"));
    }
}
