//! Portable text documents
//!
//! Nodes are discriminated by `_type`. Text blocks (`_type: "block"`) carry
//! inline spans plus the mark definitions those spans point at; every other
//! `_type` is kept verbatim as a [`PortableObject`].

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const BLOCK: &str = "block";
pub const STYLE_NORMAL: &str = "normal";
pub const LIST_BULLET: &str = "bullet";
pub const LIST_NUMBER: &str = "number";

/// A top-level portable text node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PortableNode {
    Block(TextBlock),
    Object(PortableObject),
}

impl PortableNode {
    /// The node's `_type` discriminator
    pub fn node_type(&self) -> &str {
        match self {
            PortableNode::Block(_) => BLOCK,
            PortableNode::Object(object) => &object.node_type,
        }
    }

    pub fn as_block(&self) -> Option<&TextBlock> {
        match self {
            PortableNode::Block(block) => Some(block),
            PortableNode::Object(_) => None,
        }
    }
}

impl From<TextBlock> for PortableNode {
    fn from(block: TextBlock) -> Self {
        PortableNode::Block(block)
    }
}

impl<'de> Deserialize<'de> for PortableNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match value.get("_type").and_then(Value::as_str) {
            Some(BLOCK) => TextBlock::deserialize(value)
                .map(PortableNode::Block)
                .map_err(de::Error::custom),
            Some(_) => PortableObject::deserialize(value)
                .map(PortableNode::Object)
                .map_err(de::Error::custom),
            None => Err(de::Error::missing_field("_type")),
        }
    }
}

/// Marker for the constant `_type: "block"` field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockType {
    #[default]
    #[serde(rename = "block")]
    Block,
}

/// Marker for the constant `_type: "span"` field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpanType {
    #[default]
    #[serde(rename = "span")]
    Span,
}

/// A text block: styled paragraph, heading or list item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    #[serde(rename = "_key")]
    pub key: String,
    #[serde(rename = "_type", default)]
    pub block_type: BlockType,
    pub style: String,
    #[serde(rename = "listItem", default, skip_serializing_if = "Option::is_none")]
    pub list_item: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default)]
    pub children: Vec<Span>,
    #[serde(rename = "markDefs", default)]
    pub mark_defs: Vec<MarkDefinition>,
}

impl TextBlock {
    pub fn new(key: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            block_type: BlockType::Block,
            style: style.into(),
            list_item: None,
            level: None,
            children: Vec::new(),
            mark_defs: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Span>) -> Self {
        self.children = children;
        self
    }

    pub fn with_mark_defs(mut self, mark_defs: Vec<MarkDefinition>) -> Self {
        self.mark_defs = mark_defs;
        self
    }

    pub fn with_list_item(mut self, list_item: impl Into<String>, level: u32) -> Self {
        self.list_item = Some(list_item.into());
        self.level = Some(level);
        self
    }

    pub fn mark_def(&self, key: &str) -> Option<&MarkDefinition> {
        self.mark_defs.iter().find(|def| def.key == key)
    }

    /// Concatenated text of all spans, marks ignored
    pub fn plain_text(&self) -> String {
        self.children.iter().map(|span| span.text.as_str()).collect()
    }
}

/// An inline run of text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    #[serde(rename = "_key")]
    pub key: String,
    #[serde(rename = "_type", default)]
    pub span_type: SpanType,
    pub text: String,
    /// Innermost mark first
    #[serde(default)]
    pub marks: Vec<String>,
}

impl Span {
    pub fn new(key: impl Into<String>, text: impl Into<String>, marks: Vec<String>) -> Self {
        Self {
            key: key.into(),
            span_type: SpanType::Span,
            text: text.into(),
            marks,
        }
    }
}

/// Out-of-line data for an annotation mark, e.g. a link's `href`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkDefinition {
    #[serde(rename = "_key")]
    pub key: String,
    #[serde(rename = "_type")]
    pub mark_type: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl MarkDefinition {
    pub fn from_data(key: impl Into<String>, data: MarkData) -> Self {
        Self {
            key: key.into(),
            mark_type: data.mark_type,
            fields: data.fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }
}

/// A mark definition before it has been given a key
#[derive(Debug, Clone, PartialEq)]
pub struct MarkData {
    pub mark_type: String,
    pub fields: Map<String, Value>,
}

impl MarkData {
    pub fn new(mark_type: impl Into<String>) -> Self {
        Self {
            mark_type: mark_type.into(),
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

/// Any node that is not a text block, kept as-is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortableObject {
    #[serde(rename = "_type")]
    pub node_type: String,
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}
