//! Configuration for an aggregation run.
//!
//! Settings come from two layers, merged in this order:
//!
//! 1. The `[aggregate]` table of the project file (`aggregator.toml`)
//! 2. Command-line flags and their `REPORT_AGGREGATOR_*` environment variables
//!
//! The merged [`Settings`] are validated once into an [`AggregateConfig`], an
//! immutable value object handed to [`crate::aggregate::ReportAggregator`].
//! Nothing in the pipeline reads process-wide state.
//!
//! # Project file
//!
//! ```toml
//! [project]
//! id = "parent"
//! packaging = "pom"
//! build_directory = "target"
//!
//! [[project.modules]]
//! id = "core"
//! packaging = "jar"
//! build_directory = "core/target"
//!
//! [aggregate]
//! copy_pattern = "pit-reports"
//! copy_modules = true
//! default_templates = true
//! ```
//!
//! # Modules
//!
//! - `parser` - TOML project file loading into a [`crate::project::Project`]

pub mod parser;

pub use parser::{ProjectFile, load_project_file, parse_config};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::aggregate::CopyRule;
use crate::constants::{
    DEFAULT_EXTENSION_SEPARATOR, DEFAULT_NAME_SEPARATOR, DEFAULT_REPORT_DESCRIPTION,
    DEFAULT_REPORT_NAME,
};
use crate::core::AggregatorError;

/// Raw, unvalidated aggregation settings.
///
/// Every field is optional so that layers can be merged with
/// [`Settings::merge`]. Defaults are applied by [`AggregateConfig::from_settings`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Explicit output root. Overrides `<build_directory>/<reports_directory>`.
    pub destination: Option<PathBuf>,
    /// Directory name under the project's build directory holding the report.
    /// Defaults to the copy pattern.
    pub reports_directory: Option<String>,
    /// Regular expression selecting module files to copy. Required.
    pub copy_pattern: Option<String>,
    /// Copy module files into the report (default `true`).
    pub copy_modules: Option<bool>,
    /// Render the built-in templates when no custom templates are given (default `true`).
    pub default_templates: Option<bool>,
    /// Custom template file or directory.
    pub templates: Option<PathBuf>,
    /// Display name of the report.
    pub name: Option<String>,
    /// Description of the report.
    pub description: Option<String>,
    /// Separator in template names turned into the extension separator.
    pub name_separator: Option<String>,
    /// Extension separator of output file names.
    pub extension_separator: Option<String>,
}

impl Settings {
    /// Overlay `other` on top of `self`: every value set in `other` wins.
    #[must_use]
    pub fn merge(self, other: Settings) -> Settings {
        Settings {
            destination: other.destination.or(self.destination),
            reports_directory: other.reports_directory.or(self.reports_directory),
            copy_pattern: other.copy_pattern.or(self.copy_pattern),
            copy_modules: other.copy_modules.or(self.copy_modules),
            default_templates: other.default_templates.or(self.default_templates),
            templates: other.templates.or(self.templates),
            name: other.name.or(self.name),
            description: other.description.or(self.description),
            name_separator: other.name_separator.or(self.name_separator),
            extension_separator: other.extension_separator.or(self.extension_separator),
        }
    }

    /// Resolve relative paths against `base` (the project file's directory).
    #[must_use]
    pub fn resolve_paths(mut self, base: &Path) -> Settings {
        self.destination = self.destination.map(|p| base.join(p));
        self.templates = self.templates.map(|p| base.join(p));
        self
    }
}

/// Where the templates of a run come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSelection {
    /// The bundled index and stylesheet.
    Builtin,
    /// A template file or a directory of template files.
    Path(PathBuf),
    /// No templates: the run only copies module files.
    None,
}

/// Validated, immutable configuration of one aggregation run.
#[derive(Debug, Clone)]
pub struct AggregateConfig {
    destination_root: PathBuf,
    reports_directory: String,
    copy_rule: CopyRule,
    copy_modules: bool,
    default_templates: bool,
    templates: TemplateSelection,
    name: String,
    description: String,
    name_separator: String,
    extension_separator: String,
}

impl AggregateConfig {
    /// Validate settings into a configuration.
    ///
    /// `build_directory` is the build-output directory of the current unit;
    /// the output root defaults to `<build_directory>/<reports_directory>`.
    ///
    /// # Errors
    ///
    /// - [`AggregatorError::MissingCopyPattern`] if no copy pattern is set
    /// - [`AggregatorError::InvalidCopyPattern`] if it does not compile
    /// - [`AggregatorError::EmptySeparator`] if a separator is empty
    pub fn from_settings(settings: Settings, build_directory: &Path) -> Result<Self, AggregatorError> {
        let pattern = settings.copy_pattern.ok_or(AggregatorError::MissingCopyPattern)?;
        let copy_rule = CopyRule::new(&pattern)?;

        let name_separator =
            settings.name_separator.unwrap_or_else(|| DEFAULT_NAME_SEPARATOR.to_string());
        if name_separator.is_empty() {
            return Err(AggregatorError::EmptySeparator {
                setting: "name_separator",
            });
        }
        let extension_separator =
            settings.extension_separator.unwrap_or_else(|| DEFAULT_EXTENSION_SEPARATOR.to_string());
        if extension_separator.is_empty() {
            return Err(AggregatorError::EmptySeparator {
                setting: "extension_separator",
            });
        }

        let reports_directory = settings.reports_directory.unwrap_or_else(|| pattern.clone());
        let destination_root =
            settings.destination.unwrap_or_else(|| build_directory.join(&reports_directory));

        let default_templates = settings.default_templates.unwrap_or(true);
        let templates = match settings.templates {
            Some(path) => TemplateSelection::Path(path),
            None if default_templates => TemplateSelection::Builtin,
            None => TemplateSelection::None,
        };

        Ok(Self {
            destination_root,
            reports_directory,
            copy_rule,
            copy_modules: settings.copy_modules.unwrap_or(true),
            default_templates,
            templates,
            name: settings.name.unwrap_or_else(|| DEFAULT_REPORT_NAME.to_string()),
            description: settings
                .description
                .unwrap_or_else(|| DEFAULT_REPORT_DESCRIPTION.to_string()),
            name_separator,
            extension_separator,
        })
    }

    /// Root of the aggregated report.
    pub fn destination_root(&self) -> &Path {
        &self.destination_root
    }

    /// Rule selecting the module files to copy.
    pub fn copy_rule(&self) -> &CopyRule {
        &self.copy_rule
    }

    /// Whether module files are copied.
    pub fn copy_modules(&self) -> bool {
        self.copy_modules
    }

    /// Templates to render.
    pub fn templates(&self) -> &TemplateSelection {
        &self.templates
    }

    /// Separator in template names that becomes the extension separator.
    pub fn name_separator(&self) -> &str {
        &self.name_separator
    }

    /// Extension separator of output file names.
    pub fn extension_separator(&self) -> &str {
        &self.extension_separator
    }

    /// Display name of the report.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description of the report.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Named properties exposed to templates under `report`.
    pub fn properties(&self) -> ReportProperties<'_> {
        ReportProperties {
            name: &self.name,
            description: &self.description,
            reports_directory: &self.reports_directory,
            output_name: format!("{}/index", self.reports_directory),
            destination: &self.destination_root,
            copy_pattern: self.copy_rule.as_str(),
            copy_modules: self.copy_modules,
            default_templates: self.default_templates,
            templates: match &self.templates {
                TemplateSelection::Path(path) => Some(path.as_path()),
                _ => None,
            },
        }
    }
}

/// Template-facing view of an [`AggregateConfig`].
#[derive(Debug, Serialize)]
pub struct ReportProperties<'a> {
    /// Display name.
    pub name: &'a str,
    /// Description.
    pub description: &'a str,
    /// Report directory name under the build directory.
    pub reports_directory: &'a str,
    /// Path of the report entry page relative to the site root, without extension.
    pub output_name: String,
    /// Output root.
    pub destination: &'a Path,
    /// Copy pattern as configured.
    pub copy_pattern: &'a str,
    /// Whether module files are copied.
    pub copy_modules: bool,
    /// Whether the built-in templates are enabled.
    pub default_templates: bool,
    /// Custom template path, if any.
    pub templates: Option<&'a Path>,
}
