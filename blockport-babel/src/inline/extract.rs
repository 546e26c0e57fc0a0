//! Inline extraction (inline node tree -> spans + mark definitions)
//!
//! The walk is depth-first and left-to-right. An element's children are
//! extracted first; a configured tag then adds its mark to every span beneath
//! it. Marks are appended on the way back up, so `marks[0]` is always the
//! closest configured ancestor of the text.

use super::marks::{MarkConfig, MarkRule};
use crate::html::InlineNode;
use crate::keys::KeyGenerator;
use crate::model::{MarkDefinition, Span};

/// Spans and the mark definitions they reference
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extracted {
    pub spans: Vec<Span>,
    /// In creation order
    pub definitions: Vec<MarkDefinition>,
}

impl Extracted {
    fn append(&mut self, other: Extracted) {
        self.spans.extend(other.spans);
        self.definitions.extend(other.definitions);
    }

    fn mark_all(&mut self, mark: &str) {
        for span in &mut self.spans {
            span.marks.push(mark.to_string());
        }
    }
}

/// Extract spans and mark definitions from a sequence of sibling nodes
pub fn extract_spans(
    nodes: &[InlineNode],
    marks: &MarkConfig,
    keys: &dyn KeyGenerator,
) -> Extracted {
    let mut result = Extracted::default();
    for node in nodes {
        result.append(extract_node(node, marks, keys));
    }
    result
}

fn extract_node(node: &InlineNode, marks: &MarkConfig, keys: &dyn KeyGenerator) -> Extracted {
    match node {
        InlineNode::Text(text) => Extracted {
            spans: vec![Span::new(keys.generate(), text.as_str(), Vec::new())],
            definitions: Vec::new(),
        },
        InlineNode::Element(element) => {
            let mut inner = extract_spans(&element.children, marks, keys);
            match marks.get(&element.tag) {
                Some(MarkRule::Decorator(name)) => inner.mark_all(name),
                Some(MarkRule::Annotation(factory)) => {
                    let definition = MarkDefinition::from_data(keys.generate(), factory.create(element));
                    inner.mark_all(&definition.key);
                    inner.definitions.push(definition);
                }
                None => {}
            }
            inner
        }
    }
}
