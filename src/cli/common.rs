//! Arguments and loading shared by the `aggregate` and `validate` commands.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::debug;

use crate::config::{AggregateConfig, Settings, load_project_file};
use crate::constants::DEFAULT_PROJECT_FILE;
use crate::project::Project;

/// Where the project is and how to override its `[aggregate]` settings.
///
/// Every override can also be given through a `REPORT_AGGREGATOR_*`
/// environment variable.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Project file describing the module tree
    #[arg(long, short = 'p', env = "REPORT_AGGREGATOR_PROJECT", default_value = DEFAULT_PROJECT_FILE)]
    pub project: PathBuf,

    /// Output root of the aggregated report
    #[arg(long, short = 'd', env = "REPORT_AGGREGATOR_DESTINATION")]
    pub destination: Option<PathBuf>,

    /// Regular expression selecting the module files to copy (whole name)
    #[arg(long, env = "REPORT_AGGREGATOR_COPY_PATTERN")]
    pub copy_pattern: Option<String>,

    /// Custom template file or directory
    #[arg(long, short = 't', env = "REPORT_AGGREGATOR_TEMPLATES")]
    pub templates: Option<PathBuf>,

    /// Do not copy module files
    #[arg(long, env = "REPORT_AGGREGATOR_NO_COPY")]
    pub no_copy: bool,

    /// Do not render the built-in templates
    #[arg(long, env = "REPORT_AGGREGATOR_NO_DEFAULT_TEMPLATES")]
    pub no_default_templates: bool,
}

impl ProjectArgs {
    /// Settings set on the command line. Unset flags leave the project file alone.
    pub fn overrides(&self) -> Settings {
        Settings {
            destination: self.destination.clone(),
            copy_pattern: self.copy_pattern.clone(),
            templates: self.templates.clone(),
            copy_modules: self.no_copy.then_some(false),
            default_templates: self.no_default_templates.then_some(false),
            ..Settings::default()
        }
    }

    /// Load the project file and validate the merged configuration.
    pub fn load(&self) -> Result<(Project, AggregateConfig)> {
        let (project, file_settings) = load_project_file(&self.project)?;
        let settings = file_settings.merge(self.overrides());
        debug!("Effective settings: {:?}", settings);

        let config = AggregateConfig::from_settings(settings, project.root.build_directory())
            .with_context(|| format!("Invalid configuration in {}", self.project.display()))?;
        Ok((project, config))
    }
}
