//! Inline serialization (spans + mark definitions -> HTML fragment)
//!
//! Each span's text is escaped and then wrapped once per mark, in `marks`
//! order. Since extraction records the innermost mark first, wrapping from
//! index 0 upward rebuilds the original nesting.

use super::marks::RenderConfig;
use crate::error::{Diagnostic, Diagnostics};
use crate::html::escape_text;
use crate::model::{MarkDefinition, Span};

/// Render one span to HTML
///
/// A mark resolves against the decorator renderers first, then against the
/// block's `mark_defs` through the annotation renderers. Marks that resolve to
/// neither are skipped and reported.
pub fn render_span(
    span: &Span,
    mark_defs: &[MarkDefinition],
    render: &RenderConfig,
    diagnostics: &mut Diagnostics,
) -> String {
    let mut html = escape_text(&span.text);
    for mark in &span.marks {
        if let Some(decorator) = render.decorator(mark) {
            html = decorator.render(&html);
            continue;
        }
        let annotated = mark_defs
            .iter()
            .find(|def| def.key == *mark)
            .and_then(|def| Some((render.annotation(&def.mark_type)?, def)));
        match annotated {
            Some((renderer, def)) => html = renderer.render(&html, def),
            None => diagnostics.report(Diagnostic::UnresolvedMark {
                span: span.key.clone(),
                mark: mark.clone(),
            }),
        }
    }
    html
}

/// Render each span separately, in order
pub fn spans_to_html_parts(
    spans: &[Span],
    mark_defs: &[MarkDefinition],
    render: &RenderConfig,
    diagnostics: &mut Diagnostics,
) -> Vec<String> {
    spans
        .iter()
        .map(|span| render_span(span, mark_defs, render, diagnostics))
        .collect()
}

/// Render spans into one HTML fragment
pub fn spans_to_html(
    spans: &[Span],
    mark_defs: &[MarkDefinition],
    render: &RenderConfig,
    diagnostics: &mut Diagnostics,
) -> String {
    spans_to_html_parts(spans, mark_defs, render, diagnostics).concat()
}
