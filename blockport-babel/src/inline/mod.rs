//! Inline content engines
//!
//! Converts between an HTML fragment's inline tree and portable spans:
//!
//! - [`extract`]: inline nodes -> spans + mark definitions, driven by [`MarkConfig`]
//! - [`serialize`]: spans + mark definitions -> HTML, driven by [`RenderConfig`]

pub mod extract;
pub mod marks;
pub mod serialize;

pub use extract::{extract_spans, Extracted};
pub use marks::{
    AnnotationRenderer, AttributeMark, AttributeRenderer, DecoratorRenderer, MarkConfig,
    MarkFactory, MarkRule, RenderConfig, TagRenderer,
};
pub use serialize::{render_span, spans_to_html, spans_to_html_parts};
