//! Shared configuration loader for the quire toolchain.
//!
//! `defaults/quire.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user files and key
//! overrides on top of those defaults via [`Loader`] before deserializing into
//! [`QuireConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use quire_babel::formats::{
    HtmlToMarkdown, Locale, MarkdownOptions, MarkdownToHtml, PlainHtmlOptions, PlainTextToHtml,
    TagMapping,
};
use quire_babel::ConverterRegistry;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/quire.default.toml");

/// File picked up from the working directory when present.
pub const LOCAL_CONFIG_FILE: &str = "quire.toml";

/// Top-level configuration consumed by quire applications.
#[derive(Debug, Clone, Deserialize)]
pub struct QuireConfig {
    pub markdown: MarkdownConfig,
    pub plain: PlainConfig,
    pub html: HtmlConfig,
    pub stream: StreamConfig,
}

impl QuireConfig {
    /// A registry with every direction, configured from this file.
    pub fn registry(&self) -> ConverterRegistry {
        let mut registry = ConverterRegistry::with_defaults();
        registry.register(MarkdownToHtml::new((&self.markdown).into()));
        registry.register(PlainTextToHtml::new((&self.plain).into()));
        registry.register(HtmlToMarkdown::from(&self.html));
        registry
    }
}

/// Markdown → HTML knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    pub css_class: String,
    pub escape_markdown: bool,
    pub max_quote_depth: usize,
}

impl From<&MarkdownConfig> for MarkdownOptions {
    fn from(config: &MarkdownConfig) -> Self {
        MarkdownOptions {
            css_class: config.css_class.clone(),
            escape_markdown: config.escape_markdown,
            max_quote_depth: config.max_quote_depth,
        }
    }
}

/// Plain text → HTML knobs.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PlainConfig {
    pub minify: bool,
    pub locale: Locale,
}

impl From<&PlainConfig> for PlainHtmlOptions {
    fn from(config: &PlainConfig) -> Self {
        PlainHtmlOptions {
            minify: config.minify,
            locale: config.locale,
        }
    }
}

/// HTML → Markdown tag mappings, in application order.
#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    #[serde(default)]
    pub tag_mappings: Vec<TagMapping>,
}

impl From<&HtmlConfig> for HtmlToMarkdown {
    fn from(config: &HtmlConfig) -> Self {
        HtmlToMarkdown::new(config.tag_mappings.clone())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StreamConfig {
    pub chunk_size: usize,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<QuireConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<QuireConfig, ConfigError> {
    Loader::new().build()
}
