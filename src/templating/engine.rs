//! The seam between the pipeline and a concrete template engine.

use super::context::AttributeContext;
use super::error::RenderError;
use super::template::Template;

/// Renders one template against an attribute context.
///
/// Implementations must bind every attribute of the context, support
/// iteration over `modules` and keyed lookup into `index_by_modules`, and
/// render a reference to an attribute absent from the context as empty text.
/// A failure concerns the given template only.
pub trait TemplateEngine {
    /// Render `template` to text.
    fn render(&self, template: &Template, context: &AttributeContext) -> Result<String, RenderError>;
}

impl<E: TemplateEngine + ?Sized> TemplateEngine for &E {
    fn render(&self, template: &Template, context: &AttributeContext) -> Result<String, RenderError> {
        (**self).render(template, context)
    }
}
