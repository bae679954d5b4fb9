//! Template resolution.
//!
//! Turns a [`TemplateSelection`] into an ordered list of templates:
//!
//! - **Built-in**: the bundled index and stylesheet, named under
//!   [`BUILTIN_TEMPLATE_NAMESPACE`]
//! - **File**: exactly one template named after the file (without extension)
//! - **Directory**: one template per immediate entry, sorted by file name
//!
//! Reading is done per template. A file that cannot be read still produces
//! its slot in the result, as an error, so the caller can record the failure
//! and carry on with the others.

use std::fs;
use std::path::Path;
use tracing::debug;

use super::template::{Template, name_without_extension};
use crate::config::TemplateSelection;
use crate::constants::BUILTIN_TEMPLATE_NAMESPACE;
use crate::core::AggregatorError;

/// One resolved slot: the template, or why it could not be loaded.
pub type ResolvedTemplate = Result<Template, AggregatorError>;

const INDEX_HTML: &str = include_str!("../../templates/report/index_html.tera");
const STYLE_CSS: &str = include_str!("../../templates/report/style_css.tera");

/// The bundled templates, in rendering order.
pub fn builtin_templates() -> Vec<Template> {
    [("index_html", INDEX_HTML), ("style_css", STYLE_CSS)]
        .into_iter()
        .map(|(name, source)| {
            Template::builtin(
                &format!("{BUILTIN_TEMPLATE_NAMESPACE}{name}"),
                source,
                BUILTIN_TEMPLATE_NAMESPACE,
            )
        })
        .collect()
}

/// Resolve a selection into templates.
///
/// # Errors
///
/// [`AggregatorError::TemplateListing`] if a template directory cannot be
/// listed. Per-file read failures are returned inside the list.
pub fn resolve_templates(
    selection: &TemplateSelection,
) -> Result<Vec<ResolvedTemplate>, AggregatorError> {
    match selection {
        TemplateSelection::Builtin => Ok(builtin_templates().into_iter().map(Ok).collect()),
        TemplateSelection::Path(path) if path.is_dir() => resolve_directory(path),
        TemplateSelection::Path(path) => Ok(vec![load_file(path, &path.to_string_lossy())]),
        TemplateSelection::None => Ok(Vec::new()),
    }
}

fn resolve_directory(dir: &Path) -> Result<Vec<ResolvedTemplate>, AggregatorError> {
    let listing_error = |source| AggregatorError::TemplateListing {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(listing_error)? {
        entries.push(entry.map_err(listing_error)?.path());
    }
    entries.sort();

    let prefix = dir.to_string_lossy();
    debug!("Resolved {} template(s) from {}", entries.len(), dir.display());
    Ok(entries.iter().map(|path| load_file(path, &prefix)).collect())
}

fn load_file(path: &Path, prefix: &str) -> ResolvedTemplate {
    let name = name_without_extension(path);
    match fs::read_to_string(path) {
        Ok(source) => Ok(Template::from_file(name, source, path, prefix)),
        Err(source) => Err(AggregatorError::TemplateRead {
            name,
            path: path.to_path_buf(),
            source,
        }),
    }
}
