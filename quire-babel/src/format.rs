//! Converter trait definition
//!
//! This module defines the [`Markup`] identities the engine knows about and the
//! [`Converter`] trait every conversion direction implements. The trait gives
//! the registry and the CLI one uniform `convert(text, options) -> text` shape.

use crate::error::FormatError;
use std::collections::HashMap;
use std::fmt;

/// The three markups the engine converts between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Markup {
    Markdown,
    Html,
    PlainText,
}

impl Markup {
    pub const ALL: [Markup; 3] = [Markup::Markdown, Markup::Html, Markup::PlainText];

    /// Canonical name used in converter names and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Markup::Markdown => "markdown",
            Markup::Html => "html",
            Markup::PlainText => "text",
        }
    }

    /// File extensions associated with this markup, without the leading dot.
    pub fn file_extensions(self) -> &'static [&'static str] {
        match self {
            Markup::Markdown => &["md", "markdown"],
            Markup::Html => &["html", "htm"],
            Markup::PlainText => &["txt", "text"],
        }
    }

    /// Resolve a canonical name or alias (case-insensitive).
    pub fn from_name(name: &str) -> Result<Markup, FormatError> {
        match name.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(Markup::Markdown),
            "html" | "htm" => Ok(Markup::Html),
            "text" | "txt" | "plain" | "plaintext" => Ok(Markup::PlainText),
            _ => Err(FormatError::UnknownMarkup(name.to_string())),
        }
    }

    /// Detect the markup from a filename's extension.
    pub fn from_filename(filename: &str) -> Option<Markup> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?
            .to_ascii_lowercase();
        Markup::ALL
            .into_iter()
            .find(|markup| markup.file_extensions().contains(&extension.as_str()))
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Trait for conversion directions
///
/// Implementors turn text in their [`Converter::source`] markup into text in
/// their [`Converter::target`] markup. `convert` is total: malformed input
/// degrades to a best-effort rendering instead of failing.
///
/// # Examples
///
/// ```ignore
/// struct Shout;
///
/// impl Converter for Shout {
///     fn name(&self) -> &str {
///         "text-to-text"
///     }
///
///     fn source(&self) -> Markup {
///         Markup::PlainText
///     }
///
///     fn target(&self) -> Markup {
///         Markup::PlainText
///     }
///
///     fn convert(&self, source: &str) -> String {
///         source.to_uppercase()
///     }
/// }
/// ```
pub trait Converter: Send + Sync {
    /// The name of this converter (e.g., "markdown-to-html")
    fn name(&self) -> &str;

    /// Optional description of this converter
    fn description(&self) -> &str {
        ""
    }

    /// Markup accepted as input
    fn source(&self) -> Markup;

    /// Markup produced as output
    fn target(&self) -> Markup;

    /// Convert source text using the converter's configured options
    fn convert(&self, source: &str) -> String;

    /// Convert, applying string-keyed per-call option overrides.
    ///
    /// The default implementation accepts only an empty option map. Converters
    /// with options override this and parse the keys they understand.
    fn convert_with_options(
        &self,
        source: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        if options.is_empty() {
            Ok(self.convert(source))
        } else {
            Err(FormatError::NotSupported(format!(
                "Converter '{}' does not support extra parameters",
                self.name()
            )))
        }
    }
}

/// Parse a boolean option value the way the CLI accepts them.
pub(crate) fn parse_bool_option(key: &str, raw: &str) -> Result<bool, FormatError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        _ => Err(FormatError::InvalidOption {
            key: key.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Reject option keys a converter does not understand.
pub(crate) fn unknown_option(converter: &str, key: &str) -> FormatError {
    FormatError::NotSupported(format!(
        "Converter '{converter}' does not understand option '{key}'"
    ))
}
