//! Shared configuration loader for the blockport tools.
//!
//! `defaults/blockport.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files on
//! top of those defaults via [`Loader`] before deserializing into
//! [`BlockportConfig`], which then builds configured converters.

use blockport_babel::inline::{
    AttributeMark, AttributeRenderer, MarkConfig, MarkRule, RenderConfig, TagRenderer,
};
use blockport_babel::transforms::LIST_TRANSFORMER;
use blockport_babel::{EditorToPortable, PortableToEditor, RandomKeys, SequentialKeys};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/blockport.default.toml");

/// Top-level configuration consumed by blockport applications.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockportConfig {
    pub extract: ExtractConfig,
    pub render: RenderTablesConfig,
    pub convert: ConvertConfig,
    pub ids: IdsConfig,
    pub output: OutputConfig,
}

/// Rules for reading editor HTML.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractConfig {
    /// tag -> decorator name
    #[serde(default)]
    pub decorators: BTreeMap<String, String>,
    #[serde(default)]
    pub annotations: BTreeMap<String, ExtractAnnotation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractAnnotation {
    #[serde(rename = "type")]
    pub mark_type: String,
    /// definition field -> HTML attribute
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

/// Rules for writing editor HTML.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderTablesConfig {
    /// decorator name -> tag
    #[serde(default)]
    pub decorators: BTreeMap<String, String>,
    #[serde(default)]
    pub annotations: BTreeMap<String, RenderAnnotation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderAnnotation {
    pub tag: String,
    /// HTML attribute -> definition field
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub merge_lists: bool,
    pub strict: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdsConfig {
    pub strategy: KeyStrategy,
    pub prefix: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStrategy {
    Random,
    Sequential,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub pretty: bool,
}

impl BlockportConfig {
    /// Extraction rules: the built-in table with the configured entries on top
    ///
    /// An empty decorator name or annotation type removes the rule for that tag.
    pub fn mark_config(&self) -> MarkConfig {
        let mut marks = MarkConfig::with_defaults();
        for (tag, decorator) in &self.extract.decorators {
            if decorator.is_empty() {
                marks.remove(tag);
            } else {
                marks.insert(tag, MarkRule::decorator(decorator.as_str()));
            }
        }
        for (tag, annotation) in &self.extract.annotations {
            if annotation.mark_type.is_empty() {
                marks.remove(tag);
                continue;
            }
            let factory = annotation
                .attributes
                .iter()
                .fold(AttributeMark::new(annotation.mark_type.as_str()), |mark, (field, attr)| {
                    mark.with_field(field.as_str(), attr.as_str())
                });
            marks.insert(tag, MarkRule::annotation(factory));
        }
        marks
    }

    /// Rendering rules: the built-in tables with the configured entries on top
    ///
    /// An empty tag leaves the mark unrendered.
    pub fn render_config(&self) -> RenderConfig {
        let mut render = RenderConfig::with_defaults();
        for (decorator, tag) in &self.render.decorators {
            if tag.is_empty() {
                render.remove_decorator(decorator);
            } else {
                render.insert_decorator(decorator, TagRenderer::new(tag.as_str()));
            }
        }
        for (mark_type, annotation) in &self.render.annotations {
            if annotation.tag.is_empty() {
                render.remove_annotation(mark_type);
                continue;
            }
            let renderer = annotation
                .attributes
                .iter()
                .fold(AttributeRenderer::new(annotation.tag.as_str()), |r, (attr, field)| {
                    r.with_attribute(attr.as_str(), field.as_str())
                });
            render.insert_annotation(mark_type, renderer);
        }
        render
    }

    /// Editor -> portable converter built from this configuration
    pub fn editor_to_portable(&self) -> EditorToPortable {
        let converter = EditorToPortable::new().with_mark_config(self.mark_config());
        match self.ids.strategy {
            KeyStrategy::Random => converter.with_key_generator(RandomKeys),
            KeyStrategy::Sequential => {
                converter.with_key_generator(SequentialKeys::with_prefix(self.ids.prefix.as_str()))
            }
        }
    }

    /// Portable -> editor converter built from this configuration
    pub fn portable_to_editor(&self) -> PortableToEditor {
        let converter = PortableToEditor::new().with_render_config(self.render_config());
        if self.convert.merge_lists {
            converter
        } else {
            converter.without_transformer(LIST_TRANSFORMER)
        }
    }
}

/// Layers `blockport.toml` files and single-key overrides over the embedded defaults
///
/// Later sources win. Tables such as `[extract.decorators]` merge key by key,
/// so a user file only lists the tags it changes.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let defaults = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Self {
            builder: Config::builder().add_source(defaults),
        }
    }

    /// Add a TOML file that must exist (e.g. an explicit `--config PATH`).
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml(path.as_ref(), true)
    }

    /// Add a TOML file that is skipped when absent (e.g. `./blockport.toml`).
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml(path.as_ref(), false)
    }

    fn with_toml(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Override one dotted key, such as `convert.strict` for `--strict`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge every source and read the result into a [`BlockportConfig`].
    ///
    /// Missing required files and values of the wrong shape (an unknown
    /// `ids.strategy`, say) are reported here.
    pub fn build(self) -> Result<BlockportConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults with nothing layered on top
pub fn load_defaults() -> Result<BlockportConfig, ConfigError> {
    Loader::new().build()
}
