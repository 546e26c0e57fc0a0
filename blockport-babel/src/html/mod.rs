//! HTML fragments
//!
//! Editor blocks store their inline content as small HTML fragments
//! (`Hello <b>World</b>`). This module is the boundary with HTML: it parses a
//! fragment into a minimal [`InlineNode`] tree and formats tags back into
//! strings. Nothing outside this module touches the HTML parser.
//!
//! # Library Choice
//!
//! Parsing uses `html5ever` + `markup5ever_rcdom`, the same browser-grade
//! parser stack used for HTML export elsewhere. It never rejects input:
//! malformed markup is repaired the way a browser would. The only failure mode
//! is the input stream itself failing to read.
//!
//! Formatting is plain string building; attribute values and text are escaped
//! with `html-escape`.

mod formatter;
mod parser;

pub use formatter::{escape_text, wrap_in_html, AttrValue};
pub use parser::parse_fragment;

/// A node of a parsed inline fragment
#[derive(Debug, Clone, PartialEq)]
pub enum InlineNode {
    Text(String),
    Element(Element),
}

impl InlineNode {
    pub fn text(content: impl Into<String>) -> Self {
        InlineNode::Text(content.into())
    }
}

impl From<Element> for InlineNode {
    fn from(element: Element) -> Self {
        InlineNode::Element(element)
    }
}

/// An element with a lowercase tag name, its attributes and children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<InlineNode>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: impl Into<InlineNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_text(self, content: impl Into<String>) -> Self {
        self.with_child(InlineNode::Text(content.into()))
    }

    /// Value of the first attribute called `name`
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(attr, _)| attr.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
