//! Render errors reported by template engines.

use thiserror::Error;

/// Why a single template could not be rendered.
///
/// Render errors never abort a run; the pipeline records them against the
/// template that produced them.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template text does not parse.
    #[error("Template syntax error: {message}")]
    Syntax {
        /// Cleaned-up parser message
        message: String,
        /// Line reported by the parser, if any
        line: Option<usize>,
    },

    /// The template parsed but failed while evaluating.
    #[error("Template evaluation failed: {message}")]
    Evaluation {
        /// Cleaned-up engine message
        message: String,
    },

    /// A missing attribute could not be substituted with an empty value.
    #[error("Attribute `{name}` cannot be resolved")]
    UnresolvedAttribute {
        /// Dotted attribute path as reported by the engine
        name: String,
    },

    /// Too many distinct attributes were missing.
    #[error("Template references more than {limit} missing attributes")]
    TooManyMissingAttributes {
        /// Substitution limit that was reached
        limit: usize,
    },

    /// The attribute context could not be handed to the engine.
    #[error("Invalid attribute context: {message}")]
    Context {
        /// Serialization message
        message: String,
    },
}

impl RenderError {
    /// Line of a syntax error, if known.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Syntax {
                line,
                ..
            } => *line,
            _ => None,
        }
    }
}
