//! Whole-sequence transformers
//!
//! A transformer runs after every unit has been converted and reshapes the
//! complete output, for changes that cannot be made one unit at a time.
//! Converters hold their transformers in a [`Pipeline`](crate::registry::Pipeline)
//! and run each once, in registration order.

use crate::model::{EditorBlock, LIST};
use serde_json::Value;

/// Name of the reverse converter's default list merging pass
pub const LIST_TRANSFORMER: &str = "list";

pub trait Transformer<T>: Send + Sync {
    fn transform(&self, items: Vec<T>) -> Vec<T>;
}

impl<T, F> Transformer<T> for F
where
    F: Fn(Vec<T>) -> Vec<T> + Send + Sync,
{
    fn transform(&self, items: Vec<T>) -> Vec<T> {
        self(items)
    }
}

/// Merges adjacent `list` blocks of the same style; see [`merge_adjacent_lists`]
#[derive(Debug, Default, Clone, Copy)]
pub struct MergeAdjacentLists;

impl Transformer<EditorBlock> for MergeAdjacentLists {
    fn transform(&self, items: Vec<EditorBlock>) -> Vec<EditorBlock> {
        merge_adjacent_lists(items)
    }
}

/// Merge each run of adjacent `list` blocks sharing a `style` into the first
///
/// Items are concatenated in order. Lists separated by another block, or with
/// a different style, stay separate.
///
/// ```text
/// [list(ordered, [a]), list(ordered, [b]), paragraph, list(ordered, [c])]
///   -> [list(ordered, [a, b]), paragraph, list(ordered, [c])]
/// ```
pub fn merge_adjacent_lists(blocks: Vec<EditorBlock>) -> Vec<EditorBlock> {
    let mut merged: Vec<EditorBlock> = Vec::with_capacity(blocks.len());
    for block in blocks {
        if let Some(previous) = merged.last_mut() {
            if continues_list(previous, &block) {
                append_items(previous, block);
                continue;
            }
        }
        merged.push(block);
    }
    merged
}

fn continues_list(previous: &EditorBlock, next: &EditorBlock) -> bool {
    previous.block_type == LIST
        && next.block_type == LIST
        && previous.data.get("style").is_some()
        && previous.data.get("style") == next.data.get("style")
        && has_item_array(previous)
        && has_item_array(next)
}

fn has_item_array(block: &EditorBlock) -> bool {
    matches!(block.data.get("items"), Some(Value::Array(_)))
}

/// Both blocks hold an `items` array; checked by [`continues_list`]
fn append_items(target: &mut EditorBlock, source: EditorBlock) {
    let Value::Object(mut source_data) = source.data else {
        return;
    };
    if let (Some(Value::Array(items)), Some(Value::Array(extra))) =
        (target.data.get_mut("items"), source_data.remove("items"))
    {
        items.extend(extra);
    }
}
