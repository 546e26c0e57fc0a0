//! Conversion between block-editor documents and portable text
//!
//!     This crate converts, in both directions, between two rich-text document models:
//!
//!         - Editor documents: an ordered list of `{ type, data }` blocks, where text fields hold
//!           small HTML fragments (`Hello <b>World</b>`).
//!         - Portable text: an ordered list of `_type` nodes. Text blocks carry `span` children and
//!           the `markDefs` those spans reference by key.
//!
//!     Conversion is lossy by nature: only the block types and marks that have a rule survive.
//!     Everything else is reported as a diagnostic and left out.
//!
//!     This is a pure lib, that is, it powers the blockport cli but is shell agnostic. No code
//!     here prints, reads env vars or touches the filesystem.
//!
//! Architecture
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # ConvertError (fatal) and Diagnostic (skipped units)
//!     ├── keys.rs                 # KeyGenerator: random and sequential keys
//!     ├── registry.rs             # RuleTable and Pipeline, the shape of every config surface
//!     ├── transforms.rs           # Whole-sequence transformers (list merging)
//!     ├── model
//!     │   ├── editor.rs           # EditorBlock, EditorDocument, typed payloads
//!     │   └── portable.rs         # PortableNode, TextBlock, Span, MarkDefinition
//!     ├── html                    # Fragment parser (html5ever) and tag formatter
//!     ├── inline
//!     │   ├── marks.rs            # MarkConfig (extraction) and RenderConfig (rendering)
//!     │   ├── extract.rs          # inline nodes -> spans + mark definitions
//!     │   └── serialize.rs        # spans + mark definitions -> HTML
//!     └── convert
//!         ├── forward.rs          # EditorToPortable
//!         └── reverse.rs          # PortableToEditor
//!
//! Core Algorithms
//!
//!     The interesting work is all inline. Extraction walks the parsed fragment depth-first and
//!     appends a mark to every span below a configured tag on the way back up, so a span's
//!     `marks` list starts with its closest configured ancestor. Serialization wraps the escaped
//!     text once per mark in that same order, which rebuilds the original nesting.
//!
//!     Block conversion is a table lookup by type followed by a transformer pipeline. Going back
//!     to the editor, each text block is classified by shape (numbered item, bullet item,
//!     paragraph, heading) and the default `list` transformer folds one-block-per-item lists back
//!     into a single editor list.
//!
//! Configuration
//!
//!     Every rule table merges over the built-in defaults, caller entries winning. Converters are
//!     configured with builders:
//!
//!         EditorToPortable::new().with_mark("mark", MarkRule::decorator("highlight"))
//!         PortableToEditor::new().with_mark_fn("highlight", |c| format!("<mark>{c}</mark>"))
//!
//!     Keys come from an injected KeyGenerator, so tests use SequentialKeys for stable output.
//!
//! Testing
//!     tests
//!     ├── convert                 # forward, reverse and round trip suites
//!     ├── inline                  # extraction/serialization through real HTML
//!     └── fixtures                # sample documents in both formats
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.

pub mod convert;
pub mod error;
pub mod html;
pub mod inline;
pub mod keys;
pub mod model;
pub mod registry;
pub mod transforms;

pub use convert::{Converted, EditorToPortable, PortableToEditor};
pub use error::{ConvertError, Diagnostic};
pub use keys::{KeyGenerator, RandomKeys, SequentialKeys};
pub use model::{EditorBlock, EditorDocument, PortableNode};

/// Convert editor blocks to portable nodes with the built-in rules
pub fn editor_to_portable(blocks: &[EditorBlock]) -> Result<Vec<PortableNode>, ConvertError> {
    EditorToPortable::new().convert(blocks)
}

/// Convert portable nodes to editor blocks with the built-in rules
///
/// Adjacent list items of the same kind are merged into one editor list.
pub fn portable_to_editor(nodes: &[PortableNode]) -> Result<Vec<EditorBlock>, ConvertError> {
    PortableToEditor::new().convert(nodes)
}
