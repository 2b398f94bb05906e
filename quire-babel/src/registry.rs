//! Converter registry for direction discovery and selection
//!
//! This module provides a centralized registry for all available converters.
//! Converters are keyed by their `(source, target)` markup pair.

use crate::error::FormatError;
use crate::format::{Converter, Markup};
use std::collections::HashMap;

/// Registry of conversion directions
///
/// # Examples
///
/// ```ignore
/// let registry = ConverterRegistry::default();
/// let html = registry.convert("# Title", Markup::Markdown, Markup::Html)?;
/// ```
pub struct ConverterRegistry {
    converters: HashMap<(Markup, Markup), Box<dyn Converter>>,
}

impl ConverterRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        ConverterRegistry {
            converters: HashMap::new(),
        }
    }

    /// Register a converter
    ///
    /// If a converter for the same direction already exists, it will be replaced.
    pub fn register<C: Converter + 'static>(&mut self, converter: C) {
        self.converters.insert(
            (converter.source(), converter.target()),
            Box::new(converter),
        );
    }

    /// Get the converter for a direction
    pub fn get(&self, from: Markup, to: Markup) -> Result<&dyn Converter, FormatError> {
        self.converters
            .get(&(from, to))
            .map(|c| c.as_ref())
            .ok_or_else(|| FormatError::ConverterNotFound(format!("{from}-to-{to}")))
    }

    /// Check if a direction is supported
    pub fn has(&self, from: Markup, to: Markup) -> bool {
        self.converters.contains_key(&(from, to))
    }

    /// List all available converter names (sorted)
    pub fn list_converters(&self) -> Vec<String> {
        let mut names: Vec<_> = self
            .converters
            .values()
            .map(|c| c.name().to_string())
            .collect();
        names.sort();
        names
    }

    /// Iterate over the registered converters in name order
    pub fn converters(&self) -> Vec<&dyn Converter> {
        let mut all: Vec<&dyn Converter> = self.converters.values().map(|c| c.as_ref()).collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        all
    }

    /// Detect the markup of a file from its extension
    pub fn detect_markup_from_filename(&self, filename: &str) -> Option<Markup> {
        Markup::from_filename(filename)
    }

    /// Convert source text between two markups
    pub fn convert(&self, source: &str, from: Markup, to: Markup) -> Result<String, FormatError> {
        Ok(self.get(from, to)?.convert(source))
    }

    /// Convert source text between two markups with per-call options
    pub fn convert_with_options(
        &self,
        source: &str,
        from: Markup,
        to: Markup,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        self.get(from, to)?.convert_with_options(source, options)
    }

    /// Create a registry with every built-in direction
    ///
    /// HTML→Markdown is registered with an empty mapping list; callers that
    /// want tag mappings register their own [`crate::formats::HtmlToMarkdown`].
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::formats::MarkdownToHtml::default());
        registry.register(crate::formats::HtmlToMarkdown::default());
        registry.register(crate::formats::HtmlToPlainText);
        registry.register(crate::formats::PlainTextToMarkdown);
        registry.register(crate::formats::PlainTextToHtml::default());

        registry
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
