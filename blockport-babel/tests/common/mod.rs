//! Shared helpers for the integration suites.

use blockport_babel::model::{EditorDocument, TextBlock};
use blockport_babel::{EditorToPortable, PortableNode, PortableToEditor, SequentialKeys};
use std::fs;
use std::path::PathBuf;

/// Forward converter with deterministic keys
pub fn forward() -> EditorToPortable {
    EditorToPortable::new().with_key_generator(SequentialKeys::new())
}

pub fn reverse() -> PortableToEditor {
    PortableToEditor::new()
}

pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {e}", path.display()))
}

pub fn editor_fixture() -> EditorDocument {
    serde_json::from_str(&fixture("editor.json")).expect("editor fixture parses")
}

pub fn portable_fixture() -> Vec<PortableNode> {
    serde_json::from_str(&fixture("portable.json")).expect("portable fixture parses")
}

pub fn text_block(node: &PortableNode) -> &TextBlock {
    node.as_block()
        .unwrap_or_else(|| panic!("Expected a text block, got {node:?}"))
}

/// `(text, marks)` for every span of a block, keys dropped
pub fn spans(block: &TextBlock) -> Vec<(String, Vec<String>)> {
    block
        .children
        .iter()
        .map(|span| (span.text.clone(), span.marks.clone()))
        .collect()
}

pub fn owned(marks: &[&str]) -> Vec<String> {
    marks.iter().map(|m| m.to_string()).collect()
}
