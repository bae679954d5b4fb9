//! Error handling for the report aggregator
//!
//! The error system follows two rules:
//! 1. **Strongly-typed errors** ([`AggregatorError`]) for every failure the
//!    pipeline can name, so callers can match on them
//! 2. **User-friendly messages** ([`ErrorContext`]) with actionable suggestions
//!    for the CLI
//!
//! Failures that are isolated to one module or one template are *not*
//! propagated through `Result` by the pipeline; they are recorded as outcomes
//! (see [`crate::aggregate::AggregationReport`]). The errors in this module
//! still describe those failures, and the ones that escape the entry point are
//! the fatal misconfigurations detected before any processing starts.
//!
//! # Examples
//!
//! ```rust,no_run
//! use report_aggregator::core::{AggregatorError, user_friendly_error};
//!
//! let error = AggregatorError::MissingCopyPattern;
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::templating::RenderError;

/// Typed failures of the report aggregator.
#[derive(Error, Debug)]
pub enum AggregatorError {
    /// The project file does not exist.
    #[error("Project file not found: {path}")]
    ProjectFileNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// The project file exists but is not valid TOML or misses required tables.
    #[error("Invalid project file {file}: {reason}")]
    ProjectFileParse {
        /// Project file path
        file: PathBuf,
        /// Parser message
        reason: String,
    },

    /// No copy pattern was configured.
    #[error("No copy pattern configured (set `aggregate.copy_pattern` or pass --copy-pattern)")]
    MissingCopyPattern,

    /// The copy pattern is not a valid regular expression.
    #[error("Invalid copy pattern '{pattern}': {reason}")]
    InvalidCopyPattern {
        /// The pattern as configured
        pattern: String,
        /// Regex compiler message
        reason: String,
    },

    /// Two descriptors in the project file share an identifier.
    #[error("Module '{id}' is declared more than once")]
    DuplicateModule {
        /// The duplicated identifier
        id: String,
    },

    /// A name or extension separator is empty.
    #[error("Setting '{setting}' must not be empty")]
    EmptySeparator {
        /// Name of the offending setting
        setting: &'static str,
    },

    /// A template file could not be read.
    #[error("Failed to read template '{name}' from {path}")]
    TemplateRead {
        /// Logical template name
        name: String,
        /// File that was read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// A template directory could not be listed.
    #[error("Failed to list template directory {path}")]
    TemplateListing {
        /// Directory that was listed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The output path derived from a template name leaves the destination root.
    #[error("Output path '{output}' of template '{template}' escapes the destination root")]
    UnsafeOutputPath {
        /// Logical template name
        template: String,
        /// Derived relative output path
        output: String,
    },

    /// A template failed to render.
    #[error("Failed to render template '{template}'")]
    Render {
        /// Logical template name
        template: String,
        /// Engine error
        #[source]
        source: RenderError,
    },

    /// Anything else, already formatted.
    #[error("{message}")]
    Other {
        /// Message
        message: String,
    },
}

/// An [`AggregatorError`] enriched with a suggestion and details for display.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: AggregatorError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Wrap an error without suggestion or details.
    #[must_use]
    pub fn new(error: AggregatorError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Attach a suggestion.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach details.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colored labels.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }
        Ok(())
    }
}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// The error chain is walked until an [`AggregatorError`] is found; its
/// variant picks the suggestion. Errors that carry no typed cause are shown
/// with their full `anyhow` chain as details.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(typed) = cause.downcast_ref::<AggregatorError>() {
            let details = chain_details(&error);
            let ctx = create_error_context(typed);
            return match details {
                Some(details) if ctx.details.is_none() => ctx.with_details(details),
                _ => ctx,
            };
        }
    }

    let message = error.to_string();
    let ctx = ErrorContext::new(AggregatorError::Other {
        message,
    });
    match chain_details(&error) {
        Some(details) => ctx.with_details(details),
        None => ctx,
    }
}

/// Joins the causes below the top-level message, if there are any.
fn chain_details(error: &anyhow::Error) -> Option<String> {
    let causes: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    if causes.is_empty() {
        None
    } else {
        Some(causes.join(": "))
    }
}

fn create_error_context(error: &AggregatorError) -> ErrorContext {
    // Rebuild a displayable copy; IO sources are flattened into details.
    let (copy, suggestion) = match error {
        AggregatorError::ProjectFileNotFound {
            path,
        } => (
            AggregatorError::ProjectFileNotFound {
                path: path.clone(),
            },
            Some(format!(
                "Create {} or pass --project <FILE>",
                crate::constants::DEFAULT_PROJECT_FILE
            )),
        ),
        AggregatorError::ProjectFileParse {
            file,
            reason,
        } => (
            AggregatorError::ProjectFileParse {
                file: file.clone(),
                reason: reason.clone(),
            },
            Some("Check the TOML syntax and the [project] table".to_string()),
        ),
        AggregatorError::MissingCopyPattern => (
            AggregatorError::MissingCopyPattern,
            Some("Add copy_pattern = \"<regex>\" under [aggregate]".to_string()),
        ),
        AggregatorError::InvalidCopyPattern {
            pattern,
            reason,
        } => (
            AggregatorError::InvalidCopyPattern {
                pattern: pattern.clone(),
                reason: reason.clone(),
            },
            Some("The pattern must match whole file names, e.g. \"report\\.xml\"".to_string()),
        ),
        AggregatorError::DuplicateModule {
            id,
        } => (
            AggregatorError::DuplicateModule {
                id: id.clone(),
            },
            Some("Module identifiers must be unique across the whole tree".to_string()),
        ),
        AggregatorError::EmptySeparator {
            setting,
        } => (
            AggregatorError::EmptySeparator {
                setting: *setting,
            },
            None,
        ),
        other => (
            AggregatorError::Other {
                message: other.to_string(),
            },
            None,
        ),
    };

    let ctx = ErrorContext::new(copy);
    match suggestion {
        Some(suggestion) => ctx.with_suggestion(suggestion),
        None => ctx,
    }
}
