//! Tera-backed [`TemplateEngine`].
//!
//! Tera reports a reference to an undefined variable as an error. Templates
//! of an aggregated report use optional sections, so this engine renders
//! tolerantly instead: when Tera reports `Variable `x` not found`, the dotted
//! path is filled with an empty value in a copy of the context and the
//! template is rendered again.
//!
//! The empty value is the empty string, which Tera prints as empty text,
//! string filters accept and `{% if %}` treats as false. When the template
//! iterates over the variable it is an empty sequence (or map, for
//! `{% for k, v in x %}`) instead. Paths may go through sequence indices
//! (`modules.0.foo`) as long as the element exists. Filling stops with an
//! error when the same path is reported twice or when
//! [`MAX_MISSING_ATTRIBUTES`] paths have been filled.
//!
//! Autoescaping is disabled: templates produce HTML and CSS directly.

use regex::Regex;
use serde_json::{Map, Value};
use std::error::Error;
use strsim::levenshtein;
use tera::{Context, Tera};
use tracing::debug;

use super::context::AttributeContext;
use super::engine::TemplateEngine;
use super::error::RenderError;
use super::template::Template;
use crate::constants::MAX_MISSING_ATTRIBUTES;

/// Maximum edit distance for a suggestion, as a percentage of the name length.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Renders templates with Tera.
#[derive(Debug, Clone)]
pub struct TeraEngine {
    max_missing_attributes: usize,
}

impl Default for TeraEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TeraEngine {
    /// Engine with the default substitution limit.
    pub fn new() -> Self {
        Self {
            max_missing_attributes: MAX_MISSING_ATTRIBUTES,
        }
    }

    /// Change how many distinct missing attributes are filled before giving up.
    #[must_use]
    pub fn with_max_missing_attributes(mut self, limit: usize) -> Self {
        self.max_missing_attributes = limit;
        self
    }

    fn compile(template: &Template) -> Result<Tera, RenderError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_template(template.name(), template.source()).map_err(|e| {
            RenderError::Syntax {
                message: format_tera_error(&e),
                line: extract_line(&e),
            }
        })?;
        Ok(tera)
    }
}

impl TemplateEngine for TeraEngine {
    fn render(&self, template: &Template, context: &AttributeContext) -> Result<String, RenderError> {
        let tera = Self::compile(template)?;

        let mut data = context.to_value();
        let mut filled: Vec<String> = Vec::new();

        loop {
            let tera_context = Context::from_value(data.clone()).map_err(|e| RenderError::Context {
                message: format_tera_error(&e),
            })?;

            let error = match tera.render(template.name(), &tera_context) {
                Ok(text) => return Ok(text),
                Err(error) => error,
            };

            let Some(name) = missing_variable(&error) else {
                return Err(RenderError::Evaluation {
                    message: format_tera_error(&error),
                });
            };
            if filled.contains(&name) {
                return Err(RenderError::UnresolvedAttribute {
                    name,
                });
            }
            if filled.len() >= self.max_missing_attributes {
                return Err(RenderError::TooManyMissingAttributes {
                    limit: self.max_missing_attributes,
                });
            }

            let empty = empty_value_for(template.source(), &name);
            if !fill_path(&mut data, &name, empty) {
                return Err(RenderError::UnresolvedAttribute {
                    name,
                });
            }

            let suggestions = find_similar_attributes(&name, &attribute_paths(&context.to_value()));
            if suggestions.is_empty() {
                debug!("Template '{}': attribute `{}` is missing, rendering it empty", template.name(), name);
            } else {
                debug!(
                    "Template '{}': attribute `{}` is missing, rendering it empty (did you mean {}?)",
                    template.name(),
                    name,
                    suggestions.join(", ")
                );
            }
            filled.push(name);
        }
    }
}

/// Name of the undefined variable a render error is about, if it is one.
fn missing_variable(error: &tera::Error) -> Option<String> {
    let re = Regex::new(r"Variable `([^`]+)` not found").ok()?;
    let mut current: Option<&dyn Error> = Some(error);
    while let Some(err) = current {
        if let Some(caps) = re.captures(&err.to_string()) {
            return caps.get(1).map(|m| m.as_str().to_string());
        }
        current = err.source();
    }
    None
}

/// Empty value for `name`: a container when the template loops over it.
fn empty_value_for(source: &str, name: &str) -> Value {
    let pattern = format!(
        r"\{{%-?\s*for\s+\w+(\s*,\s*\w+)?\s+in\s+{}\s*(?:\||-?%\}})",
        regex::escape(name)
    );
    let Ok(re) = Regex::new(&pattern) else {
        return Value::String(String::new());
    };
    match re.captures(source) {
        Some(caps) if caps.get(1).is_some() => Value::Object(Map::new()),
        Some(_) => Value::Array(Vec::new()),
        None => Value::String(String::new()),
    }
}

/// Insert `value` at the dotted `path`, creating intermediate maps.
///
/// Numeric segments index into existing sequence elements. Returns `false`
/// if the path already exists, indexes past the end of a sequence, or
/// crosses a scalar.
fn fill_path(root: &mut Value, path: &str, value: Value) -> bool {
    let segments: Vec<&str> = path.split('.').collect();
    let Some((last, parents)) = segments.split_last() else {
        return false;
    };

    let mut current = root;
    for segment in parents {
        current = match current {
            Value::Object(map) => {
                map.entry((*segment).to_string()).or_insert_with(|| Value::Object(Map::new()))
            }
            Value::Array(items) => {
                match segment.parse::<usize>().ok().and_then(|i| items.get_mut(i)) {
                    Some(item) => item,
                    None => return false,
                }
            }
            _ => return false,
        };
    }

    match current {
        Value::Object(map) if !map.contains_key(*last) => {
            map.insert((*last).to_string(), value);
            true
        }
        _ => false,
    }
}

/// Dotted paths of every map entry in `value`, sequences excluded.
fn attribute_paths(value: &Value) -> Vec<String> {
    fn walk(value: &Value, prefix: &str, out: &mut Vec<String>) {
        if let Value::Object(map) = value {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                walk(child, &path, out);
                out.push(path);
            }
        }
    }

    let mut paths = Vec::new();
    walk(value, "", &mut paths);
    paths
}

fn find_similar_attributes(target: &str, available: &[String]) -> Vec<String> {
    let mut scored: Vec<_> = available.iter().map(|name| (name, levenshtein(target, name))).collect();
    scored.sort_by_key(|(_, distance)| *distance);

    scored
        .into_iter()
        .filter(|(_, distance)| *distance <= target.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
        .take(3)
        .map(|(name, _)| name.clone())
        .collect()
}

/// Line of a parse error, from Tera's ` --> line:column` marker.
fn extract_line(error: &tera::Error) -> Option<usize> {
    let re = Regex::new(r"-->\s*(\d+):(\d+)").ok()?;
    let mut current: Option<&dyn Error> = Some(error);
    while let Some(err) = current {
        if let Some(caps) = re.captures(&err.to_string()) {
            return caps.get(1)?.as_str().parse().ok();
        }
        current = err.source();
    }
    None
}

/// Joins the messages of a Tera error chain into one line.
fn format_tera_error(error: &tera::Error) -> String {
    let mut messages: Vec<String> = Vec::new();
    let mut current: Option<&dyn Error> = Some(error);
    while let Some(err) = current {
        let message = err.to_string().trim().to_string();
        if !message.is_empty() && !messages.contains(&message) {
            messages.push(message);
        }
        current = err.source();
    }

    if messages.is_empty() {
        "unknown template error".to_string()
    } else {
        messages.join(": ")
    }
}
