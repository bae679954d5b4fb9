//! Template resolution and rendering.
//!
//! - [`resolver`] turns the configured [`TemplateSelection`](crate::config::TemplateSelection)
//!   into [`Template`]s
//! - [`context`] builds the [`AttributeContext`] shared by all templates of a run
//! - [`engine`] is the [`TemplateEngine`] seam; [`tera_engine`] implements it
//!   with Tera
//!
//! Nothing outside [`tera_engine`] knows which engine renders the templates.

pub mod context;
pub mod engine;
pub mod error;
pub mod resolver;
pub mod template;
pub mod tera_engine;

pub use context::AttributeContext;
pub use engine::TemplateEngine;
pub use error::RenderError;
pub use resolver::{ResolvedTemplate, builtin_templates, resolve_templates};
pub use template::{Template, replace_last};
pub use tera_engine::TeraEngine;
