//! Document models for both sides of the conversion.

pub mod editor;
pub mod portable;

pub use editor::{
    EditorBlock, EditorDocument, HeaderData, ListData, ListStyle, ParagraphData, HEADER, LIST,
    PARAGRAPH,
};
pub use portable::{
    BlockType, MarkData, MarkDefinition, PortableNode, PortableObject, Span, SpanType, TextBlock,
    BLOCK, LIST_BULLET, LIST_NUMBER, STYLE_NORMAL,
};
