//! Templates and output file name derivation.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// One renderable unit.
///
/// The logical name doubles as the source of the output file name: the last
/// name separator becomes the extension separator, then the naming prefix is
/// stripped (see [`Template::output_name`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    source: Cow<'static, str>,
    origin: Option<PathBuf>,
    prefix: String,
}

impl Template {
    /// A template whose text is compiled into the binary.
    pub fn builtin(name: &str, source: &'static str, prefix: &str) -> Self {
        Self {
            name: name.to_string(),
            source: Cow::Borrowed(source),
            origin: None,
            prefix: prefix.to_string(),
        }
    }

    /// A template read from `origin`.
    pub fn from_file(
        name: impl Into<String>,
        source: String,
        origin: impl Into<PathBuf>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source: Cow::Owned(source),
            origin: Some(origin.into()),
            prefix: prefix.into(),
        }
    }

    /// A template built from a string, with no naming prefix.
    pub fn inline(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: Cow::Owned(source.into()),
            origin: None,
            prefix: String::new(),
        }
    }

    /// Logical name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw template text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// File the template was read from, if any.
    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    /// Prefix stripped from the derived output name.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Output path relative to the destination root.
    ///
    /// `templates/report/index_html` with prefix `templates/report/` and
    /// separators `_` / `.` gives `index.html`.
    pub fn output_name(&self, name_separator: &str, extension_separator: &str) -> String {
        let file_name = replace_last(&self.name, name_separator, extension_separator);
        if self.prefix.is_empty() {
            return file_name;
        }
        match file_name.strip_prefix(self.prefix.as_str()) {
            Some(stripped) => stripped.to_string(),
            None => file_name,
        }
    }
}

/// Replaces the last occurrence of `from` in `input` with `to`.
///
/// Returns `input` unchanged when `from` does not occur.
pub fn replace_last(input: &str, from: &str, to: &str) -> String {
    match input.rfind(from) {
        Some(index) => {
            let mut out = String::with_capacity(input.len() - from.len() + to.len());
            out.push_str(&input[..index]);
            out.push_str(to);
            out.push_str(&input[index + from.len()..]);
            out
        }
        None => input.to_string(),
    }
}

/// File name of `path` without its last extension.
///
/// `summary_html.st` -> `summary_html`, `a.b.st` -> `a.b`, `README` -> `README`.
pub fn name_without_extension(path: &Path) -> String {
    path.file_stem().map(|stem| stem.to_string_lossy().into_owned()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_last() {
        assert_eq!(replace_last("index_html", "_", "."), "index.html");
        assert_eq!(replace_last("module_summary_html", "_", "."), "module_summary.html");
        assert_eq!(replace_last("plain", "_", "."), "plain");
        assert_eq!(replace_last("a--b--c", "--", "."), "a--b.c");
        assert_eq!(replace_last("", "_", "."), "");
    }

    #[test]
    fn test_builtin_output_name_strips_namespace() {
        let template = Template::builtin("templates/report/index_html", "", "templates/report/");
        assert_eq!(template.output_name("_", "."), "index.html");
    }

    #[test]
    fn test_output_name_keeps_unrelated_prefix() {
        let template =
            Template::from_file("summary_html", String::new(), "/t/summary_html.st", "/t/summary_html.st");
        assert_eq!(template.output_name("_", "."), "summary.html");
    }

    #[test]
    fn test_output_name_replaces_exactly_once() {
        let template = Template::inline("per_module_report_html", "");
        let name = template.output_name("_", ".");
        assert_eq!(name, "per_module_report.html");
        assert_eq!(name.matches('.').count(), 1);
    }

    #[test]
    fn test_name_without_extension() {
        assert_eq!(name_without_extension(Path::new("dir/summary_html.st")), "summary_html");
        assert_eq!(name_without_extension(Path::new("a.b.st")), "a.b");
        assert_eq!(name_without_extension(Path::new("README")), "README");
    }
}
