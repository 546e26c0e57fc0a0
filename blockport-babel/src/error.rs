//! Error and diagnostic types for conversion runs
//!
//! Two channels exist. [`ConvertError`] aborts the whole call: the input could
//! not be read at all. [`Diagnostic`] records a unit that was skipped while the
//! rest of the document kept converting.

use std::fmt;

/// Errors that abort a conversion call
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The HTML fragment could not be read by the parser
    #[error("Parse error: {0}")]
    Parse(#[from] std::io::Error),

    /// A block's data payload does not have the shape its rule expects
    #[error("Invalid data for '{block_type}' block: {source}")]
    InvalidData {
        block_type: String,
        #[source]
        source: serde_json::Error,
    },

    /// A caller-supplied rule gave up on its input
    #[error("Rule '{rule}' failed: {message}")]
    Rule { rule: String, message: String },
}

/// A non-fatal problem found while converting
///
/// The offending unit is left out of the output and conversion continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// No converter is registered for an editor block's `type`
    UnknownBlockType { index: usize, block_type: String },
    /// No converter is registered for a portable node's `_type`
    UnknownNodeType { index: usize, node_type: String },
    /// A text block matched none of the list, paragraph or heading shapes
    UnsupportedBlockShape {
        key: String,
        style: String,
        list_item: Option<String>,
    },
    /// A span mark resolved to neither a decorator nor a mark definition
    UnresolvedMark { span: String, mark: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownBlockType { index, block_type } => {
                write!(f, "Missing converter for block type '{block_type}' (block {index})")
            }
            Diagnostic::UnknownNodeType { index, node_type } => {
                write!(f, "Missing converter for node type '{node_type}' (node {index})")
            }
            Diagnostic::UnsupportedBlockShape {
                key,
                style,
                list_item,
            } => match list_item {
                Some(item) => write!(
                    f,
                    "Unsupported block '{key}' with style '{style}' and list item '{item}'"
                ),
                None => write!(f, "Unsupported block '{key}' with style '{style}'"),
            },
            Diagnostic::UnresolvedMark { span, mark } => {
                write!(f, "Unresolved mark '{mark}' on span '{span}'")
            }
        }
    }
}

/// Ordered collector for the diagnostics of one conversion call
///
/// Every reported entry is also emitted as a `tracing` warning.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{diagnostic}");
        self.entries.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
