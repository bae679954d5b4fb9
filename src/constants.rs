//! Global constants used throughout the report aggregator.
//!
//! Defaults for the aggregation settings and the names of the built-in
//! templates live here so the CLI, the project file loader and the pipeline
//! agree on them.

/// Packaging kind that marks a grouping unit.
///
/// A unit with this packaging only groups child modules and produces no
/// report artifacts of its own. It is skipped by the module collector and is
/// the only kind of unit allowed to drive an aggregation run.
pub const GROUPING_PACKAGING: &str = "pom";

/// Default project file name, looked up in the current directory.
pub const DEFAULT_PROJECT_FILE: &str = "aggregator.toml";

/// Build-output directory used when a descriptor does not name one.
pub const DEFAULT_BUILD_DIRECTORY: &str = "target";

/// Character in a template name that becomes the extension separator of the
/// output file (`index_html` -> `index.html`).
pub const DEFAULT_NAME_SEPARATOR: &str = "_";

/// Replacement for the last [`DEFAULT_NAME_SEPARATOR`] in a template name.
pub const DEFAULT_EXTENSION_SEPARATOR: &str = ".";

/// Display name of the aggregated report.
pub const DEFAULT_REPORT_NAME: &str = "Aggregation Report";

/// Description of the aggregated report.
pub const DEFAULT_REPORT_DESCRIPTION: &str = "aggregations of multiple modules";

/// Namespace of the built-in templates. Stripped from their names when the
/// output file name is derived.
pub const BUILTIN_TEMPLATE_NAMESPACE: &str = "templates/report/";

/// Maximum number of missing attributes the Tera engine fills in before it
/// gives up on a single template.
pub const MAX_MISSING_ATTRIBUTES: usize = 64;
