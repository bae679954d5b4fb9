//! The `validate` command: check a project without writing anything.
//!
//! Loads the project file, validates the merged configuration and resolves
//! the templates. Prints the collected modules, the grouping units left out,
//! and the output path of every template.
//!
//! ```bash
//! report-aggregator validate
//! report-aggregator validate --format json
//! ```
//!
//! Exits with an error if the configuration is invalid, a template cannot be
//! loaded, or a template's output path would leave the destination root.

use anyhow::{Result, bail};
use clap::{Args, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use super::common::ProjectArgs;
use crate::aggregate::output_path;
use crate::config::AggregateConfig;
use crate::project::{Collection, Project, collect_modules};
use crate::templating::resolve_templates;

/// Output format of the validation result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON document
    Json,
}

/// Check the project file and templates without writing anything.
#[derive(Args, Debug, Clone, Default)]
pub struct ValidateCommand {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// What a run would do.
#[derive(Debug, Default, Serialize)]
pub struct ValidationResult {
    /// Output root.
    pub destination: PathBuf,
    /// Why the run would stop early, if it would.
    pub nothing_to_do: Option<String>,
    /// Modules that would be aggregated.
    pub modules: Vec<String>,
    /// Grouping units left out.
    pub excluded: Vec<String>,
    /// Templates with their output paths.
    pub templates: Vec<TemplateCheck>,
    /// Template problems.
    pub errors: Vec<String>,
}

/// One resolved template.
#[derive(Debug, Serialize)]
pub struct TemplateCheck {
    /// Logical name.
    pub name: String,
    /// Where it would be written.
    pub output: PathBuf,
}

impl ValidateCommand {
    /// Run the command.
    pub fn execute(self, quiet: bool) -> Result<()> {
        let (project, config) = self.project.load()?;
        let result = check(&project, &config);

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
            OutputFormat::Text if !quiet => print_result(&self.project.project, &result),
            OutputFormat::Text => {}
        }

        if !result.errors.is_empty() {
            bail!("{} template problem(s) found", result.errors.len());
        }
        Ok(())
    }
}

/// Dry-run the collection and template resolution of a project.
pub fn check(project: &Project, config: &AggregateConfig) -> ValidationResult {
    let mut result = ValidationResult {
        destination: config.destination_root().to_path_buf(),
        excluded: project
            .descendants
            .iter()
            .filter(|m| m.kind.is_grouping())
            .map(|m| m.id.clone())
            .collect(),
        ..ValidationResult::default()
    };

    match collect_modules(project) {
        Collection::Modules(index) => {
            result.modules = index.ids().map(str::to_string).collect();
        }
        Collection::NothingToDo(reason) => result.nothing_to_do = Some(reason.to_string()),
    }

    let resolved = match resolve_templates(config.templates()) {
        Ok(resolved) => resolved,
        Err(error) => {
            result.errors.push(error.to_string());
            return result;
        }
    };
    for template in resolved {
        match template.map_err(anyhow::Error::from).and_then(|t| {
            let output = output_path(config, &t)?;
            Ok(TemplateCheck {
                name: t.name().to_string(),
                output,
            })
        }) {
            Ok(check) => result.templates.push(check),
            Err(error) => result.errors.push(format!("{error:#}")),
        }
    }
    result
}

fn print_result(project_file: &std::path::Path, result: &ValidationResult) {
    println!("{} {}", "✓".green(), format!("Valid project file {}", project_file.display()).bold());
    println!("  Destination: {}", result.destination.display());

    if let Some(reason) = &result.nothing_to_do {
        println!("  {} Nothing to aggregate: {}", "-".yellow(), reason);
    }

    println!("\n{} ({})", "Modules".bold(), result.modules.len());
    for id in &result.modules {
        println!("  {id}");
    }
    if !result.excluded.is_empty() {
        println!("\n{} ({})", "Grouping units (excluded)".bold(), result.excluded.len());
        for id in &result.excluded {
            println!("  {}", id.dimmed());
        }
    }

    println!("\n{} ({})", "Templates".bold(), result.templates.len());
    for template in &result.templates {
        println!("  {} -> {}", template.name, template.output.display());
    }
    for error in &result.errors {
        println!("  {} {}", "✗".red(), error);
    }
}
