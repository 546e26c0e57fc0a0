//! Editor blocks -> portable nodes
//!
//! Built-in converters:
//!
//! | block type  | output                                                     |
//! |-------------|------------------------------------------------------------|
//! | `paragraph` | one text block, `style: normal`                            |
//! | `header`    | one text block, `style: h{level}`                          |
//! | `list`      | one text block per item, `listItem: number|bullet`, level 1 |
//!
//! No transformers run by default.

use super::Converted;
use crate::error::{ConvertError, Diagnostic, Diagnostics};
use crate::html::parse_fragment;
use crate::inline::{extract_spans, MarkConfig, MarkRule};
use crate::keys::{KeyGenerator, RandomKeys};
use crate::model::{
    EditorBlock, HeaderData, ListData, ListStyle, ParagraphData, PortableNode, TextBlock, HEADER,
    LIST, LIST_BULLET, LIST_NUMBER, PARAGRAPH, STYLE_NORMAL,
};
use crate::registry::{Pipeline, RuleTable};
use crate::transforms::Transformer;
use std::sync::Arc;

/// What a block converter can reach while converting one block
pub struct ForwardContext<'a> {
    marks: &'a MarkConfig,
    keys: &'a dyn KeyGenerator,
    diagnostics: &'a mut Diagnostics,
}

impl ForwardContext<'_> {
    pub fn marks(&self) -> &MarkConfig {
        self.marks
    }

    pub fn new_key(&self) -> String {
        self.keys.generate()
    }

    /// Parse an HTML fragment and build a text block from its spans
    ///
    /// The block gets a fresh key and owns the mark definitions created for it.
    pub fn text_block(&self, html: &str, style: &str) -> Result<TextBlock, ConvertError> {
        let nodes = parse_fragment(html)?;
        let extracted = extract_spans(&nodes, self.marks, self.keys);
        Ok(TextBlock::new(self.new_key(), style)
            .with_children(extracted.spans)
            .with_mark_defs(extracted.definitions))
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.report(diagnostic);
    }
}

/// Converts one editor block into zero or more portable nodes
pub trait BlockConverter: Send + Sync {
    fn convert(
        &self,
        block: &EditorBlock,
        cx: &mut ForwardContext<'_>,
    ) -> Result<Vec<PortableNode>, ConvertError>;
}

impl<F> BlockConverter for F
where
    F: Fn(&EditorBlock, &mut ForwardContext<'_>) -> Result<Vec<PortableNode>, ConvertError>
        + Send
        + Sync,
{
    fn convert(
        &self,
        block: &EditorBlock,
        cx: &mut ForwardContext<'_>,
    ) -> Result<Vec<PortableNode>, ConvertError> {
        self(block, cx)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ParagraphConverter;

impl BlockConverter for ParagraphConverter {
    fn convert(
        &self,
        block: &EditorBlock,
        cx: &mut ForwardContext<'_>,
    ) -> Result<Vec<PortableNode>, ConvertError> {
        let data: ParagraphData = block.data_as()?;
        Ok(vec![PortableNode::from(cx.text_block(&data.text, STYLE_NORMAL)?)])
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HeaderConverter;

impl BlockConverter for HeaderConverter {
    fn convert(
        &self,
        block: &EditorBlock,
        cx: &mut ForwardContext<'_>,
    ) -> Result<Vec<PortableNode>, ConvertError> {
        let data: HeaderData = block.data_as()?;
        let style = format!("h{}", data.level);
        Ok(vec![PortableNode::from(cx.text_block(&data.text, &style)?)])
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ListConverter;

impl BlockConverter for ListConverter {
    fn convert(
        &self,
        block: &EditorBlock,
        cx: &mut ForwardContext<'_>,
    ) -> Result<Vec<PortableNode>, ConvertError> {
        let data: ListData = block.data_as()?;
        let list_item = match data.style {
            ListStyle::Ordered => LIST_NUMBER,
            ListStyle::Unordered => LIST_BULLET,
        };
        let mut nodes = Vec::with_capacity(data.items.len());
        for item in &data.items {
            let block = cx.text_block(item, STYLE_NORMAL)?.with_list_item(list_item, 1);
            nodes.push(PortableNode::from(block));
        }
        Ok(nodes)
    }
}

type SharedBlockConverter = Arc<dyn BlockConverter>;
type SharedTransformer = Arc<dyn Transformer<PortableNode>>;

/// Editor -> portable converter
///
/// # Examples
///
/// ```ignore
/// let converter = EditorToPortable::new()
///     .with_mark("mark", MarkRule::decorator("highlight"))
///     .with_key_generator(SequentialKeys::new());
/// let nodes = converter.convert(&blocks)?;
/// ```
#[derive(Clone)]
pub struct EditorToPortable {
    marks: MarkConfig,
    converters: RuleTable<SharedBlockConverter>,
    transformers: Pipeline<SharedTransformer>,
    keys: Arc<dyn KeyGenerator>,
}

impl EditorToPortable {
    /// Converter with the built-in rules and random keys
    pub fn new() -> Self {
        let mut converters: RuleTable<SharedBlockConverter> = RuleTable::new();
        converters.insert(PARAGRAPH, Arc::new(ParagraphConverter));
        converters.insert(HEADER, Arc::new(HeaderConverter));
        converters.insert(LIST, Arc::new(ListConverter));

        Self {
            marks: MarkConfig::with_defaults(),
            converters,
            transformers: Pipeline::new(),
            keys: Arc::new(RandomKeys),
        }
    }

    /// Register an extraction rule for `tag`, replacing any existing one
    pub fn with_mark(mut self, tag: &str, rule: MarkRule) -> Self {
        self.marks.insert(tag, rule);
        self
    }

    /// Replace the whole extraction table
    pub fn with_mark_config(mut self, marks: MarkConfig) -> Self {
        self.marks = marks;
        self
    }

    pub fn with_converter(
        mut self,
        block_type: &str,
        converter: impl BlockConverter + 'static,
    ) -> Self {
        self.converters.insert(block_type, Arc::new(converter));
        self
    }

    pub fn with_converter_fn<F>(self, block_type: &str, converter: F) -> Self
    where
        F: Fn(&EditorBlock, &mut ForwardContext<'_>) -> Result<Vec<PortableNode>, ConvertError>
            + Send
            + Sync
            + 'static,
    {
        self.with_converter(block_type, converter)
    }

    pub fn without_converter(mut self, block_type: &str) -> Self {
        self.converters.remove(block_type);
        self
    }

    /// Append a transformer; an existing one with the same name is replaced in place
    pub fn with_transformer(
        mut self,
        name: &str,
        transformer: impl Transformer<PortableNode> + 'static,
    ) -> Self {
        self.transformers.register(name, Arc::new(transformer));
        self
    }

    pub fn with_transformer_fn<F>(self, name: &str, transformer: F) -> Self
    where
        F: Fn(Vec<PortableNode>) -> Vec<PortableNode> + Send + Sync + 'static,
    {
        self.with_transformer(name, transformer)
    }

    pub fn without_transformer(mut self, name: &str) -> Self {
        self.transformers.remove(name);
        self
    }

    pub fn with_key_generator(mut self, keys: impl KeyGenerator + 'static) -> Self {
        self.keys = Arc::new(keys);
        self
    }

    pub fn marks(&self) -> &MarkConfig {
        &self.marks
    }

    /// Registered block types (sorted)
    pub fn converter_names(&self) -> Vec<String> {
        self.converters.names()
    }

    /// Transformer names in execution order
    pub fn transformer_names(&self) -> Vec<String> {
        self.transformers.names()
    }

    pub fn convert(&self, blocks: &[EditorBlock]) -> Result<Vec<PortableNode>, ConvertError> {
        self.convert_with_report(blocks).map(|converted| converted.output)
    }

    /// Convert, also returning the diagnostics for every skipped unit
    pub fn convert_with_report(
        &self,
        blocks: &[EditorBlock],
    ) -> Result<Converted<PortableNode>, ConvertError> {
        let mut diagnostics = Diagnostics::new();
        let mut output = Vec::with_capacity(blocks.len());

        for (index, block) in blocks.iter().enumerate() {
            let Some(converter) = self.converters.get(&block.block_type) else {
                diagnostics.report(Diagnostic::UnknownBlockType {
                    index,
                    block_type: block.block_type.clone(),
                });
                continue;
            };
            let mut cx = ForwardContext {
                marks: &self.marks,
                keys: self.keys.as_ref(),
                diagnostics: &mut diagnostics,
            };
            let nodes = converter.convert(block, &mut cx)?;
            tracing::debug!(
                index,
                block_type = %block.block_type,
                nodes = nodes.len(),
                "converted editor block"
            );
            output.extend(nodes);
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

impl Default for EditorToPortable {
    fn default() -> Self {
        Self::new()
    }
}
