//! HTML fragment parsing (HTML -> inline node tree)
//!
//! Pipeline: fragment -> `<body>` wrapper -> html5ever RcDom -> [`InlineNode`]s
//!
//! The fragment is wrapped in an explicit `<body>` before parsing. Without it,
//! html5ever's "before html" insertion mode drops leading whitespace, which
//! would eat the space in `" <b>x</b>"`.

use super::{wrap_in_html, Element, InlineNode};
use crate::error::ConvertError;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Parse an HTML fragment into its top-level inline nodes
///
/// Comments, doctypes and processing instructions are dropped; text and
/// elements are kept in document order.
pub fn parse_fragment(html: &str) -> Result<Vec<InlineNode>, ConvertError> {
    let wrapped = wrap_in_html("body", None, html);
    let dom = parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut wrapped.as_bytes())?;

    Ok(find_element(&dom.document, "body")
        .map(|body| convert_children(&body))
        .unwrap_or_default())
}

/// Depth-first search for the first element named `tag`
fn find_element(handle: &Handle, tag: &str) -> Option<Handle> {
    for child in handle.children.borrow().iter() {
        if let NodeData::Element { name, .. } = &child.data {
            if name.local.as_ref() == tag {
                return Some(child.clone());
            }
        }
        if let Some(found) = find_element(child, tag) {
            return Some(found);
        }
    }
    None
}

fn convert_children(handle: &Handle) -> Vec<InlineNode> {
    handle
        .children
        .borrow()
        .iter()
        .filter_map(convert_node)
        .collect()
}

fn convert_node(handle: &Handle) -> Option<InlineNode> {
    match &handle.data {
        NodeData::Text { contents } => Some(InlineNode::Text(contents.borrow().to_string())),
        NodeData::Element { name, attrs, .. } => {
            let attributes = attrs
                .borrow()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect();
            Some(InlineNode::Element(Element {
                tag: name.local.as_ref().to_ascii_lowercase(),
                attributes,
                children: convert_children(handle),
            }))
        }
        _ => None,
    }
}
