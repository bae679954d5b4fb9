//! The aggregation pipeline.
//!
//! [`ReportAggregator::run`] drives one run:
//!
//! 1. collect the modules of the project ([`collect_modules`])
//! 2. copy their matching build-output entries ([`FileAggregator`]), unless
//!    copying is disabled
//! 3. resolve the templates ([`resolve_templates`])
//! 4. render each template against one shared [`AttributeContext`] and write
//!    it under the destination root
//!
//! Steps 2 and 4 never stop early. Every module and every template gets an
//! outcome, collected in an [`AggregationReport`]; the caller decides whether
//! failures matter.

pub mod copy;
pub mod outcome;

pub use copy::{CopyRule, FileAggregator};
pub use outcome::{AggregationReport, CopyOutcome, RenderOutcome, RunOutcome};

use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::AggregateConfig;
use crate::core::AggregatorError;
use crate::project::{Collection, ModuleIndex, Project, collect_modules};
use crate::templating::{
    AttributeContext, ResolvedTemplate, Template, TemplateEngine, resolve_templates,
};
use crate::utils::fs::{is_safe_path, write_output};

/// Runs the aggregation pipeline with one configuration and one engine.
#[derive(Debug)]
pub struct ReportAggregator<E> {
    config: AggregateConfig,
    engine: E,
}

impl<E: TemplateEngine> ReportAggregator<E> {
    /// Create a pipeline.
    pub fn new(config: AggregateConfig, engine: E) -> Self {
        Self {
            config,
            engine,
        }
    }

    /// Configuration of the pipeline.
    pub fn config(&self) -> &AggregateConfig {
        &self.config
    }

    /// Run the pipeline for `project`.
    pub fn run(&self, project: &Project) -> RunOutcome {
        let index = match collect_modules(project) {
            Collection::Modules(index) => index,
            Collection::NothingToDo(reason) => {
                debug!("Nothing to aggregate for {}: {}", project.root.id, reason);
                return RunOutcome::NothingToDo(reason);
            }
        };

        let root = self.config.destination_root();
        info!("Aggregating {} module(s) into {}", index.len(), root.display());

        let mut report = AggregationReport::default();
        if self.config.copy_modules() {
            report.copies = FileAggregator::new(self.config.copy_rule().clone(), root).aggregate(&index);
        } else {
            debug!("Copying module files is disabled");
        }
        report.renders = self.render_templates(&index);

        RunOutcome::Completed(report)
    }

    fn render_templates(&self, index: &ModuleIndex) -> Vec<RenderOutcome> {
        let templates = match resolve_templates(self.config.templates()) {
            Ok(templates) => templates,
            Err(error) => {
                warn!("Cannot resolve templates: {}", error);
                return vec![RenderOutcome::Failed {
                    template: selection_label(&error),
                    error: error.into(),
                }];
            }
        };
        if templates.is_empty() {
            debug!("No templates to render");
            return Vec::new();
        }

        let context = match AttributeContext::for_run(index, &self.config.properties()) {
            Ok(context) => context,
            Err(error) => {
                warn!("Cannot build the attribute context: {}", error);
                return vec![RenderOutcome::Failed {
                    template: "attribute context".to_string(),
                    error: error.into(),
                }];
            }
        };

        templates.into_iter().map(|resolved| self.render_one(resolved, &context)).collect()
    }

    fn render_one(&self, resolved: ResolvedTemplate, context: &AttributeContext) -> RenderOutcome {
        let template = match resolved {
            Ok(template) => template,
            Err(error) => {
                let name = match &error {
                    AggregatorError::TemplateRead {
                        name,
                        ..
                    } => name.clone(),
                    other => other.to_string(),
                };
                warn!("Skipping template {}: {}", name, error);
                return RenderOutcome::Failed {
                    template: name,
                    error: error.into(),
                };
            }
        };

        match self.render_and_write(&template, context) {
            Ok(path) => {
                debug!("Rendered {} to {}", template.name(), path.display());
                RenderOutcome::Written {
                    template: template.name().to_string(),
                    path,
                }
            }
            Err(error) => {
                warn!("Failed to render template {}: {:#}", template.name(), error);
                RenderOutcome::Failed {
                    template: template.name().to_string(),
                    error,
                }
            }
        }
    }

    fn render_and_write(&self, template: &Template, context: &AttributeContext) -> anyhow::Result<PathBuf> {
        let path = output_path(&self.config, template)?;

        let text = self.engine.render(template, context).map_err(|source| AggregatorError::Render {
            template: template.name().to_string(),
            source,
        })?;

        write_output(&path, &text)
            .with_context(|| format!("Failed to write template {}", template.name()))?;
        Ok(path)
    }
}

/// Absolute output path of `template` under the destination root.
///
/// # Errors
///
/// [`AggregatorError::UnsafeOutputPath`] if the derived name is absolute or
/// climbs out of the destination root.
pub fn output_path(config: &AggregateConfig, template: &Template) -> Result<PathBuf, AggregatorError> {
    let output = template.output_name(config.name_separator(), config.extension_separator());
    let root = config.destination_root();
    if output.is_empty() || !is_safe_path(root, Path::new(&output)) {
        return Err(AggregatorError::UnsafeOutputPath {
            template: template.name().to_string(),
            output,
        });
    }
    Ok(root.join(output))
}

fn selection_label(error: &AggregatorError) -> String {
    match error {
        AggregatorError::TemplateListing {
            path,
            ..
        } => path.display().to_string(),
        other => other.to_string(),
    }
}
