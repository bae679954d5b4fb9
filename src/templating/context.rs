//! Attribute context shared by every template of a run.

use serde::Serialize;
use serde_json::{Map, Value};

use super::error::RenderError;
use crate::config::ReportProperties;
use crate::project::ModuleIndex;

/// Ordered module sequence.
pub const MODULES_KEY: &str = "modules";
/// Module map keyed by identifier.
pub const INDEX_BY_MODULES_KEY: &str = "index_by_modules";
/// Named properties of the running configuration.
pub const REPORT_KEY: &str = "report";

/// Mapping from attribute name to structured value.
///
/// Built once per run and only read afterwards. Values are stored as JSON so
/// any engine can traverse nested sequences and maps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeContext {
    attributes: Map<String, Value>,
}

impl AttributeContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for one aggregation run.
    ///
    /// Binds the modules in discovery order under `modules`, the same modules
    /// keyed by identifier under `index_by_modules`, and the configuration
    /// properties under `report`.
    pub fn for_run(index: &ModuleIndex, properties: &ReportProperties<'_>) -> Result<Self, RenderError> {
        let mut context = Self::new();
        context.insert(MODULES_KEY, index.modules())?;
        context.insert(INDEX_BY_MODULES_KEY, index)?;
        context.insert(REPORT_KEY, properties)?;
        Ok(context)
    }

    /// Bind `value` under `key`, replacing any previous binding.
    pub fn insert<T: Serialize + ?Sized>(&mut self, key: impl Into<String>, value: &T) -> Result<(), RenderError> {
        let key = key.into();
        let value = serde_json::to_value(value).map_err(|e| RenderError::Context {
            message: format!("attribute '{key}': {e}"),
        })?;
        self.attributes.insert(key, value);
        Ok(())
    }

    /// Value bound under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// `true` if `key` is bound.
    pub fn contains(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Bound attribute names.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// Number of bound attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// `true` if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// The whole context as one JSON object.
    pub fn to_value(&self) -> Value {
        Value::Object(self.attributes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AggregateConfig, Settings};
    use crate::project::Module;
    use std::path::Path;

    #[test]
    fn test_run_context_shape() {
        let mut index = ModuleIndex::new();
        index.insert(Module::new("web", "war", "/p/web/target"));
        index.insert(Module::new("core", "jar", "/p/core/target"));

        let settings = Settings {
            copy_pattern: Some("pit-reports".to_string()),
            ..Settings::default()
        };
        let config = AggregateConfig::from_settings(settings, Path::new("/p/target")).unwrap();
        let context = AttributeContext::for_run(&index, &config.properties()).unwrap();

        assert_eq!(context.len(), 3);
        let modules = context.get(MODULES_KEY).unwrap().as_array().unwrap();
        assert_eq!(modules[0]["id"], "web");
        assert_eq!(modules[1]["id"], "core");
        assert_eq!(context.get(INDEX_BY_MODULES_KEY).unwrap()["core"]["packaging"], "jar");
        assert_eq!(context.get(REPORT_KEY).unwrap()["output_name"], "pit-reports/index");
    }

    #[test]
    fn test_insert_replaces() {
        let mut context = AttributeContext::new();
        context.insert("title", "first").unwrap();
        context.insert("title", "second").unwrap();
        assert_eq!(context.get("title"), Some(&Value::from("second")));
        assert_eq!(context.keys().collect::<Vec<_>>(), vec!["title"]);
    }
}
