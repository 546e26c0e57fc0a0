//! Portable nodes -> editor blocks
//!
//! Nodes are dispatched by `_type`; the built-in `block` converter handles text
//! blocks by classifying their shape (see [`BlockShape`]). The default `list`
//! transformer then folds the one-block-per-item lists back into single editor
//! list blocks.

use super::Converted;
use crate::error::{ConvertError, Diagnostic, Diagnostics};
use crate::inline::{spans_to_html, AnnotationRenderer, DecoratorRenderer, RenderConfig};
use crate::model::{
    EditorBlock, ListStyle, MarkDefinition, PortableNode, TextBlock, BLOCK, LIST_BULLET,
    LIST_NUMBER, STYLE_NORMAL,
};
use crate::registry::{Pipeline, RuleTable};
use crate::transforms::{MergeAdjacentLists, Transformer, LIST_TRANSFORMER};
use std::sync::Arc;

/// What a node converter can reach while converting one node
pub struct ReverseContext<'a> {
    render: &'a RenderConfig,
    diagnostics: &'a mut Diagnostics,
}

impl ReverseContext<'_> {
    pub fn render_config(&self) -> &RenderConfig {
        self.render
    }

    /// The block's spans rendered as one HTML fragment
    pub fn inline_html(&mut self, block: &TextBlock) -> String {
        spans_to_html(&block.children, &block.mark_defs, self.render, self.diagnostics)
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.report(diagnostic);
    }
}

/// Converts one portable node into zero or more editor blocks
pub trait NodeConverter: Send + Sync {
    fn convert(
        &self,
        node: &PortableNode,
        cx: &mut ReverseContext<'_>,
    ) -> Result<Vec<EditorBlock>, ConvertError>;
}

impl<F> NodeConverter for F
where
    F: Fn(&PortableNode, &mut ReverseContext<'_>) -> Result<Vec<EditorBlock>, ConvertError>
        + Send
        + Sync,
{
    fn convert(
        &self,
        node: &PortableNode,
        cx: &mut ReverseContext<'_>,
    ) -> Result<Vec<EditorBlock>, ConvertError> {
        self(node, cx)
    }
}

/// The editor shape a text block maps to
///
/// Checked in order: numbered list item, bulleted list item, normal paragraph,
/// heading `h1`..`h6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockShape {
    OrderedListItem,
    BulletListItem,
    Paragraph,
    Heading(u8),
    Unsupported,
}

impl BlockShape {
    pub fn classify(block: &TextBlock) -> Self {
        match block.list_item.as_deref() {
            Some(LIST_NUMBER) => return BlockShape::OrderedListItem,
            Some(LIST_BULLET) => return BlockShape::BulletListItem,
            _ => {}
        }
        if block.style == STYLE_NORMAL {
            return BlockShape::Paragraph;
        }
        block
            .style
            .strip_prefix('h')
            .and_then(|level| level.parse::<u8>().ok())
            .filter(|level| (1..=6).contains(level))
            .map_or(BlockShape::Unsupported, BlockShape::Heading)
    }
}

/// Built-in converter for `_type: "block"` nodes
#[derive(Debug, Default, Clone, Copy)]
pub struct TextBlockConverter;

impl NodeConverter for TextBlockConverter {
    fn convert(
        &self,
        node: &PortableNode,
        cx: &mut ReverseContext<'_>,
    ) -> Result<Vec<EditorBlock>, ConvertError> {
        let Some(block) = node.as_block() else {
            return Ok(Vec::new());
        };
        let converted = match BlockShape::classify(block) {
            BlockShape::OrderedListItem => {
                EditorBlock::list(ListStyle::Ordered, vec![cx.inline_html(block)])
            }
            BlockShape::BulletListItem => {
                EditorBlock::list(ListStyle::Unordered, vec![cx.inline_html(block)])
            }
            BlockShape::Paragraph => EditorBlock::paragraph(cx.inline_html(block)),
            BlockShape::Heading(level) => EditorBlock::header(cx.inline_html(block), level),
            BlockShape::Unsupported => {
                cx.report(Diagnostic::UnsupportedBlockShape {
                    key: block.key.clone(),
                    style: block.style.clone(),
                    list_item: block.list_item.clone(),
                });
                return Ok(Vec::new());
            }
        };
        Ok(vec![converted])
    }
}

type SharedNodeConverter = Arc<dyn NodeConverter>;
type SharedTransformer = Arc<dyn Transformer<EditorBlock>>;

/// Portable -> editor converter
#[derive(Clone)]
pub struct PortableToEditor {
    render: RenderConfig,
    converters: RuleTable<SharedNodeConverter>,
    transformers: Pipeline<SharedTransformer>,
}

impl PortableToEditor {
    /// Converter with the built-in renderers, the `block` converter and the
    /// `list` merging transformer
    pub fn new() -> Self {
        let mut converters: RuleTable<SharedNodeConverter> = RuleTable::new();
        converters.insert(BLOCK, Arc::new(TextBlockConverter));

        let mut transformers: Pipeline<SharedTransformer> = Pipeline::new();
        transformers.register(LIST_TRANSFORMER, Arc::new(MergeAdjacentLists));

        Self {
            render: RenderConfig::with_defaults(),
            converters,
            transformers,
        }
    }

    /// Register a decorator renderer, replacing any existing one
    pub fn with_mark(mut self, name: &str, renderer: impl DecoratorRenderer + 'static) -> Self {
        self.render.insert_decorator(name, renderer);
        self
    }

    pub fn with_mark_fn<F>(self, name: &str, renderer: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.with_mark(name, renderer)
    }

    /// Register a renderer for mark definitions of `mark_type`
    pub fn with_mark_def(
        mut self,
        mark_type: &str,
        renderer: impl AnnotationRenderer + 'static,
    ) -> Self {
        self.render.insert_annotation(mark_type, renderer);
        self
    }

    pub fn with_mark_def_fn<F>(self, mark_type: &str, renderer: F) -> Self
    where
        F: Fn(&str, &MarkDefinition) -> String + Send + Sync + 'static,
    {
        self.with_mark_def(mark_type, renderer)
    }

    /// Replace both rendering tables
    pub fn with_render_config(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }

    pub fn with_converter(
        mut self,
        node_type: &str,
        converter: impl NodeConverter + 'static,
    ) -> Self {
        self.converters.insert(node_type, Arc::new(converter));
        self
    }

    pub fn with_converter_fn<F>(self, node_type: &str, converter: F) -> Self
    where
        F: Fn(&PortableNode, &mut ReverseContext<'_>) -> Result<Vec<EditorBlock>, ConvertError>
            + Send
            + Sync
            + 'static,
    {
        self.with_converter(node_type, converter)
    }

    pub fn without_converter(mut self, node_type: &str) -> Self {
        self.converters.remove(node_type);
        self
    }

    /// Append a transformer; an existing one with the same name is replaced in place
    pub fn with_transformer(
        mut self,
        name: &str,
        transformer: impl Transformer<EditorBlock> + 'static,
    ) -> Self {
        self.transformers.register(name, Arc::new(transformer));
        self
    }

    pub fn with_transformer_fn<F>(self, name: &str, transformer: F) -> Self
    where
        F: Fn(Vec<EditorBlock>) -> Vec<EditorBlock> + Send + Sync + 'static,
    {
        self.with_transformer(name, transformer)
    }

    pub fn without_transformer(mut self, name: &str) -> Self {
        self.transformers.remove(name);
        self
    }

    pub fn render_config(&self) -> &RenderConfig {
        &self.render
    }

    /// Registered node types (sorted)
    pub fn converter_names(&self) -> Vec<String> {
        self.converters.names()
    }

    /// Transformer names in execution order
    pub fn transformer_names(&self) -> Vec<String> {
        self.transformers.names()
    }

    pub fn convert(&self, nodes: &[PortableNode]) -> Result<Vec<EditorBlock>, ConvertError> {
        self.convert_with_report(nodes).map(|converted| converted.output)
    }

    /// Convert, also returning the diagnostics for every skipped unit or mark
    pub fn convert_with_report(
        &self,
        nodes: &[PortableNode],
    ) -> Result<Converted<EditorBlock>, ConvertError> {
        let mut diagnostics = Diagnostics::new();
        let mut output = Vec::with_capacity(nodes.len());

        for (index, node) in nodes.iter().enumerate() {
            let Some(converter) = self.converters.get(node.node_type()) else {
                diagnostics.report(Diagnostic::UnknownNodeType {
                    index,
                    node_type: node.node_type().to_string(),
                });
                continue;
            };
            let mut cx = ReverseContext {
                render: &self.render,
                diagnostics: &mut diagnostics,
            };
            let blocks = converter.convert(node, &mut cx)?;
            tracing::debug!(
                index,
                node_type = node.node_type(),
                blocks = blocks.len(),
                "converted portable node"
            );
            output.extend(blocks);
        }

        for (name, transformer) in self.transformers.iter() {
            let before = output.len();
            output = transformer.transform(output);
            tracing::debug!(transformer = name, before, after = output.len(), "applied transformer");
        }

        Ok(Converted {
            output,
            diagnostics: diagnostics.into_vec(),
        })
    }
}

impl Default for PortableToEditor {
    fn default() -> Self {
        Self::new()
    }
}
