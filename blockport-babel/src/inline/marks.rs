//! Mark rule tables
//!
//! Extraction and rendering each have their own table:
//!
//! - [`MarkConfig`] maps an HTML tag to a [`MarkRule`]. A decorator rule names
//!   an inline style (`b` -> `strong`); an annotation rule builds a mark
//!   definition from the element (`a` -> `link { href }`).
//! - [`RenderConfig`] maps decorator names to [`DecoratorRenderer`]s and mark
//!   definition types to [`AnnotationRenderer`]s.
//!
//! Both start from the built-in defaults and accept caller rules on top.

use crate::html::{wrap_in_html, AttrValue, Element};
use crate::model::{MarkData, MarkDefinition};
use crate::registry::RuleTable;
use std::fmt;
use std::sync::Arc;

pub const STRONG: &str = "strong";
pub const EM: &str = "em";
pub const UNDERLINE: &str = "underline";
pub const STRIKE_THROUGH: &str = "strike-through";
pub const CODE: &str = "code";
pub const LINK: &str = "link";

/// Builds mark definition data from an element
pub trait MarkFactory: Send + Sync {
    fn create(&self, element: &Element) -> MarkData;
}

impl<F> MarkFactory for F
where
    F: Fn(&Element) -> MarkData + Send + Sync,
{
    fn create(&self, element: &Element) -> MarkData {
        self(element)
    }
}

/// What a configured tag contributes to the spans beneath it
#[derive(Clone)]
pub enum MarkRule {
    /// Push this decorator name onto each span
    Decorator(String),
    /// Create a keyed mark definition and push its key onto each span
    Annotation(Arc<dyn MarkFactory>),
}

impl MarkRule {
    pub fn decorator(name: impl Into<String>) -> Self {
        MarkRule::Decorator(name.into())
    }

    pub fn annotation(factory: impl MarkFactory + 'static) -> Self {
        MarkRule::Annotation(Arc::new(factory))
    }

    pub fn annotation_fn<F>(factory: F) -> Self
    where
        F: Fn(&Element) -> MarkData + Send + Sync + 'static,
    {
        MarkRule::Annotation(Arc::new(factory))
    }
}

impl fmt::Debug for MarkRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkRule::Decorator(name) => f.debug_tuple("Decorator").field(name).finish(),
            MarkRule::Annotation(_) => f.write_str("Annotation(..)"),
        }
    }
}

/// Annotation factory copying element attributes into definition fields
///
/// A missing attribute becomes an empty string.
#[derive(Debug, Clone)]
pub struct AttributeMark {
    mark_type: String,
    /// (field, attribute)
    fields: Vec<(String, String)>,
}

impl AttributeMark {
    pub fn new(mark_type: impl Into<String>) -> Self {
        Self {
            mark_type: mark_type.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>, attribute: impl Into<String>) -> Self {
        self.fields.push((field.into(), attribute.into()));
        self
    }
}

impl MarkFactory for AttributeMark {
    fn create(&self, element: &Element) -> MarkData {
        self.fields
            .iter()
            .fold(MarkData::new(&self.mark_type), |data, (field, attribute)| {
                data.with_field(field, element.attribute(attribute).unwrap_or_default())
            })
    }
}

/// Tag -> mark rule table used by extraction
#[derive(Debug, Clone)]
pub struct MarkConfig {
    rules: RuleTable<MarkRule>,
}

impl MarkConfig {
    /// An empty table: every tag is transparent
    pub fn new() -> Self {
        Self {
            rules: RuleTable::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut config = Self::new();
        for tag in ["b", "strong"] {
            config.insert(tag, MarkRule::decorator(STRONG));
        }
        for tag in ["i", "em"] {
            config.insert(tag, MarkRule::decorator(EM));
        }
        config.insert("u", MarkRule::decorator(UNDERLINE));
        for tag in ["s", "del", "strike"] {
            config.insert(tag, MarkRule::decorator(STRIKE_THROUGH));
        }
        config.insert("code", MarkRule::decorator(CODE));
        config.insert(
            "a",
            MarkRule::annotation(AttributeMark::new(LINK).with_field("href", "href")),
        );
        config
    }

    /// Register a rule for `tag` (case-insensitive), replacing any existing one
    pub fn insert(&mut self, tag: &str, rule: MarkRule) {
        self.rules.insert(tag.to_ascii_lowercase(), rule);
    }

    pub fn get(&self, tag: &str) -> Option<&MarkRule> {
        self.rules.get(tag)
    }

    pub fn remove(&mut self, tag: &str) -> Option<MarkRule> {
        self.rules.remove(&tag.to_ascii_lowercase())
    }

    pub fn tags(&self) -> Vec<String> {
        self.rules.names()
    }

    /// Merge `other` over this config; its rules win
    pub fn merge(&mut self, other: MarkConfig) {
        self.rules.merge(other.rules);
    }
}

impl Default for MarkConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Renders decorated content
pub trait DecoratorRenderer: Send + Sync {
    fn render(&self, content: &str) -> String;
}

impl<F> DecoratorRenderer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn render(&self, content: &str) -> String {
        self(content)
    }
}

/// Renders content annotated by a mark definition
pub trait AnnotationRenderer: Send + Sync {
    fn render(&self, content: &str, definition: &MarkDefinition) -> String;
}

impl<F> AnnotationRenderer for F
where
    F: Fn(&str, &MarkDefinition) -> String + Send + Sync,
{
    fn render(&self, content: &str, definition: &MarkDefinition) -> String {
        self(content, definition)
    }
}

/// Wraps content in a bare tag
#[derive(Debug, Clone)]
pub struct TagRenderer {
    tag: String,
}

impl TagRenderer {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}

impl DecoratorRenderer for TagRenderer {
    fn render(&self, content: &str) -> String {
        wrap_in_html(&self.tag, None, content)
    }
}

/// Wraps content in a tag whose attributes come from definition fields
///
/// Fields that are missing or not a string/number are left out.
#[derive(Debug, Clone)]
pub struct AttributeRenderer {
    tag: String,
    /// (attribute, field)
    attributes: Vec<(String, String)>,
}

impl AttributeRenderer {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>, field: impl Into<String>) -> Self {
        self.attributes.push((attribute.into(), field.into()));
        self
    }
}

impl AnnotationRenderer for AttributeRenderer {
    fn render(&self, content: &str, definition: &MarkDefinition) -> String {
        let attrs: Vec<(&str, AttrValue)> = self
            .attributes
            .iter()
            .filter_map(|(attribute, field)| {
                let value = AttrValue::from_json(definition.field(field)?)?;
                Some((attribute.as_str(), value))
            })
            .collect();
        wrap_in_html(&self.tag, Some(attrs.as_slice()), content)
    }
}

/// Decorator and annotation renderers used by serialization
#[derive(Clone)]
pub struct RenderConfig {
    decorators: RuleTable<Arc<dyn DecoratorRenderer>>,
    annotations: RuleTable<Arc<dyn AnnotationRenderer>>,
}

impl RenderConfig {
    /// Empty tables: every mark is unresolved
    pub fn new() -> Self {
        Self {
            decorators: RuleTable::new(),
            annotations: RuleTable::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut config = Self::new();
        for (decorator, tag) in [
            (STRONG, "b"),
            (EM, "i"),
            (UNDERLINE, "u"),
            (STRIKE_THROUGH, "s"),
            (CODE, "code"),
        ] {
            config.insert_decorator(decorator, TagRenderer::new(tag));
        }
        config.insert_annotation(LINK, AttributeRenderer::new("a").with_attribute("href", "href"));
        config
    }

    pub fn insert_decorator(&mut self, name: &str, renderer: impl DecoratorRenderer + 'static) {
        self.decorators.insert(name, Arc::new(renderer));
    }

    pub fn insert_annotation(&mut self, mark_type: &str, renderer: impl AnnotationRenderer + 'static) {
        self.annotations.insert(mark_type, Arc::new(renderer));
    }

    pub fn remove_decorator(&mut self, name: &str) {
        self.decorators.remove(name);
    }

    pub fn remove_annotation(&mut self, mark_type: &str) {
        self.annotations.remove(mark_type);
    }

    pub fn decorator(&self, name: &str) -> Option<&dyn DecoratorRenderer> {
        self.decorators.get(name).map(|r| r.as_ref())
    }

    pub fn annotation(&self, mark_type: &str) -> Option<&dyn AnnotationRenderer> {
        self.annotations.get(mark_type).map(|r| r.as_ref())
    }

    pub fn decorator_names(&self) -> Vec<String> {
        self.decorators.names()
    }

    pub fn annotation_names(&self) -> Vec<String> {
        self.annotations.names()
    }

    /// Merge `other` over this config; its renderers win
    pub fn merge(&mut self, other: RenderConfig) {
        self.decorators.merge(other.decorators);
        self.annotations.merge(other.annotations);
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for RenderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderConfig")
            .field("decorators", &self.decorators)
            .field("annotations", &self.annotations)
            .finish()
    }
}
