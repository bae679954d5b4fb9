//! Test project builder for simplified test setup
//!
//! Builds a multi-module project in a temporary directory: a project file
//! plus whatever build-output files the test needs.

use anyhow::Result;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::{Settings, load_project_file};
use crate::constants::DEFAULT_PROJECT_FILE;
use crate::project::Project;

/// A builder for creating test projects with a fluent API
pub struct TestProjectBuilder {
    temp_dir: TempDir,
    root: (String, String),
    modules: Vec<(String, String)>,
    settings: Vec<(String, String)>,
    files: Vec<(String, String)>,
}

impl TestProjectBuilder {
    /// A grouping unit `parent` with no modules and no settings
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
            root: ("parent".to_string(), "pom".to_string()),
            modules: Vec::new(),
            settings: Vec::new(),
            files: Vec::new(),
        })
    }

    /// Replace the root unit
    pub fn with_root(mut self, id: &str, packaging: &str) -> Self {
        self.root = (id.to_string(), packaging.to_string());
        self
    }

    /// Add a direct child; its build output is `<id>/target`
    pub fn with_module(mut self, id: &str, packaging: &str) -> Self {
        self.modules.push((id.to_string(), packaging.to_string()));
        self
    }

    /// Add an `[aggregate]` entry; `value` is a TOML literal such as `"\"site\""` or `"false"`
    pub fn with_setting(mut self, key: &str, value: &str) -> Self {
        self.settings.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a file relative to the project directory
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.push((path.into(), content.into()));
        self
    }

    /// Add a file under the build output of module `id`
    pub fn with_build_file(self, id: &str, path: &str, content: &str) -> Self {
        self.with_file(format!("{id}/target/{path}"), content)
    }

    /// Render the project file
    pub fn project_file_content(&self) -> String {
        let mut content = String::new();
        let _ = writeln!(content, "[project]\nid = \"{}\"\npackaging = \"{}\"", self.root.0, self.root.1);
        for (id, packaging) in &self.modules {
            let _ = writeln!(content, "\n[[project.modules]]\nid = \"{id}\"\npackaging = \"{packaging}\"");
        }
        content.push_str("\n[aggregate]\n");
        for (key, value) in &self.settings {
            let _ = writeln!(content, "{key} = {value}");
        }
        content
    }

    /// Build the test project
    pub fn build(self) -> Result<TestProject> {
        let root = self.temp_dir.path().to_path_buf();
        let project_file = root.join(DEFAULT_PROJECT_FILE);
        std::fs::write(&project_file, self.project_file_content())?;

        for (path, content) in &self.files {
            let full_path = root.join(path);
            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(full_path, content)?;
        }

        Ok(TestProject {
            _temp_dir: self.temp_dir,
            root,
            project_file,
        })
    }
}

/// A built test project
pub struct TestProject {
    _temp_dir: TempDir, // Keep temp dir alive
    pub root: PathBuf,
    pub project_file: PathBuf,
}

impl TestProject {
    /// Create a new test project builder
    pub fn builder() -> Result<TestProjectBuilder> {
        TestProjectBuilder::new()
    }

    /// Absolute path of `path` inside the project directory
    pub fn path(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Check if a file exists in the project directory
    pub fn file_exists(&self, path: impl AsRef<Path>) -> bool {
        self.root.join(path).exists()
    }

    /// Read a file from the project directory
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<String> {
        Ok(std::fs::read_to_string(self.root.join(path))?)
    }

    /// Write a file to the project directory
    pub fn write_file(&self, path: impl AsRef<Path>, content: impl AsRef<str>) -> Result<()> {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(full_path, content.as_ref())?;
        Ok(())
    }

    /// Load the project file
    pub fn load(&self) -> Result<(Project, Settings)> {
        load_project_file(&self.project_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_creates_project() {
        let project = TestProject::builder()
            .unwrap()
            .with_module("core", "jar")
            .with_setting("copy_pattern", "\"pit-reports\"")
            .with_build_file("core", "pit-reports/index.html", "core")
            .build()
            .unwrap();

        assert!(project.file_exists("aggregator.toml"));
        assert_eq!(project.read_file("core/target/pit-reports/index.html").unwrap(), "core");

        let (loaded, settings) = project.load().unwrap();
        assert_eq!(loaded.root.id, "parent");
        assert_eq!(loaded.descendants[0].build_directory, project.path("core/target"));
        assert_eq!(settings.copy_pattern.as_deref(), Some("pit-reports"));
    }
}
