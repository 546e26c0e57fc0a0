//! Block editor documents
//!
//! A document is an ordered list of `{ type, data }` blocks. `data` stays an
//! untyped JSON value on the block itself; rules that understand a type read
//! it through one of the typed payload views below.

use crate::error::ConvertError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const PARAGRAPH: &str = "paragraph";
pub const HEADER: &str = "header";
pub const LIST: &str = "list";

/// A single typed content block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub data: Value,
}

impl EditorBlock {
    pub fn new(block_type: impl Into<String>, data: Value) -> Self {
        Self {
            block_type: block_type.into(),
            data,
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(PARAGRAPH, json!({ "text": text.into() }))
    }

    pub fn header(text: impl Into<String>, level: u8) -> Self {
        Self::new(HEADER, json!({ "text": text.into(), "level": level }))
    }

    pub fn list(style: ListStyle, items: Vec<String>) -> Self {
        Self::new(LIST, json!({ "style": style, "items": items }))
    }

    /// Read the payload as `T`, attributing failures to this block's type
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T, ConvertError> {
        T::deserialize(&self.data).map_err(|source| ConvertError::InvalidData {
            block_type: self.block_type.clone(),
            source,
        })
    }
}

/// The save envelope written by the editor: `{ time, blocks, version }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
    pub blocks: Vec<EditorBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl EditorDocument {
    pub fn new(blocks: Vec<EditorBlock>) -> Self {
        Self {
            time: None,
            blocks,
            version: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParagraphData {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HeaderData {
    pub text: String,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListData {
    #[serde(default)]
    pub style: ListStyle,
    pub items: Vec<String>,
}

/// Only `ordered` is numbered; any other or missing style reads as `unordered`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    Ordered,
    #[default]
    #[serde(other)]
    Unordered,
}
