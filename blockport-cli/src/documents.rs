//! Input documents and conversion direction
//!
//! Editor input is either the save envelope (`{ "blocks": [...] }`) or a bare
//! block array. Portable input is always a node array. The direction can be
//! given explicitly or read off the JSON shape.

use blockport_babel::{
    ConvertError, Converted, Diagnostic, EditorBlock, EditorDocument, EditorToPortable,
    PortableNode, PortableToEditor,
};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not tell the input format: {0}")]
    Undetected(&'static str),

    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// Which way a document is converted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// editor blocks -> portable nodes
    ToPortable,
    /// portable nodes -> editor blocks
    ToEditor,
}

impl Direction {
    pub const NAMES: &'static [&'static str] = &["portable", "editor"];

    /// Guess the direction from the input's shape
    ///
    /// An object with `blocks`, or an array whose first item has `type`, is
    /// editor input. An array whose first item has `_type` is portable input.
    pub fn detect(input: &Value) -> Result<Self, DocumentError> {
        match input {
            Value::Object(map) if map.contains_key("blocks") => Ok(Direction::ToPortable),
            Value::Object(_) => Err(DocumentError::Undetected("object without 'blocks'")),
            Value::Array(items) => match items.first() {
                None => Err(DocumentError::Undetected("empty array")),
                Some(Value::Object(first)) if first.contains_key("_type") => {
                    Ok(Direction::ToEditor)
                }
                Some(Value::Object(first)) if first.contains_key("type") => {
                    Ok(Direction::ToPortable)
                }
                Some(_) => Err(DocumentError::Undetected(
                    "first item has neither 'type' nor '_type'",
                )),
            },
            _ => Err(DocumentError::Undetected("expected an object or an array")),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "portable" => Ok(Direction::ToPortable),
            "editor" => Ok(Direction::ToEditor),
            other => Err(format!("unknown target '{other}' (expected portable or editor)")),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::ToPortable => f.write_str("portable"),
            Direction::ToEditor => f.write_str("editor"),
        }
    }
}

/// Read editor blocks from an envelope or a bare array
pub fn read_editor_blocks(input: Value) -> Result<Vec<EditorBlock>, DocumentError> {
    if input.is_object() {
        let document: EditorDocument = serde_json::from_value(input)?;
        Ok(document.blocks)
    } else {
        Ok(serde_json::from_value(input)?)
    }
}

pub fn read_portable_nodes(input: Value) -> Result<Vec<PortableNode>, DocumentError> {
    Ok(serde_json::from_value(input)?)
}

/// Converted JSON plus the diagnostics collected on the way
#[derive(Debug)]
pub struct Outcome {
    pub json: Value,
    pub diagnostics: Vec<Diagnostic>,
}

impl Outcome {
    fn from_converted<T: Serialize>(converted: Converted<T>) -> Result<Self, DocumentError> {
        Ok(Outcome {
            json: serde_json::to_value(&converted.output)?,
            diagnostics: converted.diagnostics,
        })
    }
}

/// Run one conversion over raw input text
///
/// `direction` of `None` means detect it from the input.
pub fn convert_source(
    source: &str,
    direction: Option<Direction>,
    forward: &EditorToPortable,
    reverse: &PortableToEditor,
) -> Result<(Direction, Outcome), DocumentError> {
    let input: Value = serde_json::from_str(source)?;
    let direction = match direction {
        Some(direction) => direction,
        None => Direction::detect(&input)?,
    };
    let outcome = match direction {
        Direction::ToPortable => {
            let blocks = read_editor_blocks(input)?;
            Outcome::from_converted(forward.convert_with_report(&blocks)?)?
        }
        Direction::ToEditor => {
            let nodes = read_portable_nodes(input)?;
            Outcome::from_converted(reverse.convert_with_report(&nodes)?)?
        }
    };
    Ok((direction, outcome))
}

/// Serialize output JSON, pretty or compact
pub fn render_json(value: &Value, pretty: bool) -> Result<String, DocumentError> {
    let mut out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    out.push('\n');
    Ok(out)
}
