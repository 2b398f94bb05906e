//! Markdown → HTML conversion
//!
//! # Pipeline
//!
//! 1. Protected-block extraction splits the source into text, fenced code,
//!    and raw markup segments (see [`crate::common::protect`]).
//! 2. The block tokenizer ([`blocks`]) classifies text lines into headings,
//!    rules, tables, quotes, lists, and text lines, collecting footnote
//!    definitions on the way. Blockquotes are parsed with an explicit frame
//!    stack bounded by [`MarkdownOptions::max_quote_depth`].
//! 3. The inline tokenizer ([`inlines`]) applies its rules in precedence
//!    order to every piece of inline text.
//! 4. The renderer ([`render`]) walks the tree once, appends the footnote
//!    section, collapses blank-line runs, and trims.
//!
//! # Escape mode
//!
//! With [`MarkdownOptions::escape_markdown`] set, no structure is parsed:
//! protected blocks are still rendered, every Markdown special character in
//! the remaining text is backslash-escaped, and the result is wrapped in one
//! paragraph. This renders Markdown source as literal text.
//!
//! # Element Mapping Table
//!
//! | Markdown                 | HTML                                              |
//! |--------------------------|---------------------------------------------------|
//! | ```` ```lang ````        | `<pre><code data-lang="lang">` (escaped body)     |
//! | `# Heading`              | `<h1>` .. `<h6>`                                  |
//! | `---` / `***` / `___`    | `<hr>`                                            |
//! | `> quote`                | `<blockquote>` with nested content                |
//! | `1. item`                | `<ol><li>`, numbered by position                  |
//! | `- item` / `* ` / `+ `   | `<ul><li>`                                        |
//! | `- [ ] task`             | `<li><input type="checkbox" disabled>`            |
//! | GFM table                | `<table>` with `<thead>` and `<tbody>`            |
//! | `[^id]` / `[^id]: body`  | `<sup><a>` reference, footnote `<section>`        |
//! | `` `code` ``             | `<code>` (escaped)                                |
//! | `**b**` / `*i*`          | `<strong>` / `<em>`                               |
//! | `~~s~~`                  | `<del>`                                           |
//! | `^sup^` / `~sub~`        | `<sup>` / `<sub>`                                 |
//! | `![alt](src)`            | `<img>`                                           |
//! | `[text](href "title")`   | `<a>`                                             |
//! | other line               | `<p>`, unless it already opens with a tag         |

pub mod blocks;
pub mod inlines;
pub mod render;

use crate::common::escape::escape_markdown;
use crate::common::protect::{class_attr, Protected};
use crate::common::text::normalize_newlines;
use crate::error::FormatError;
use crate::format::{parse_bool_option, unknown_option, Converter, Markup};
use render::HtmlRenderer;
use std::collections::HashMap;

/// Default bound on blockquote nesting.
pub const DEFAULT_MAX_QUOTE_DEPTH: usize = 16;

/// Options for Markdown → HTML conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownOptions {
    /// Class applied to every emitted element; empty emits no class attribute
    pub css_class: String,
    /// Render the source as literal text instead of parsing it
    pub escape_markdown: bool,
    /// Blockquotes nested deeper than this are rendered literally
    pub max_quote_depth: usize,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            css_class: String::new(),
            escape_markdown: false,
            max_quote_depth: DEFAULT_MAX_QUOTE_DEPTH,
        }
    }
}

impl MarkdownOptions {
    pub fn with_css_class(mut self, class: impl Into<String>) -> Self {
        self.css_class = class.into();
        self
    }

    pub fn escaped(mut self) -> Self {
        self.escape_markdown = true;
        self
    }

    /// Apply one string-keyed override.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), FormatError> {
        match key {
            "css-class" | "class" => self.css_class = value.to_string(),
            "escape-markdown" | "escape" => self.escape_markdown = parse_bool_option(key, value)?,
            "max-quote-depth" => {
                self.max_quote_depth =
                    value
                        .parse()
                        .map_err(|_| FormatError::InvalidOption {
                            key: key.to_string(),
                            value: value.to_string(),
                        })?
            }
            _ => return Err(unknown_option("markdown-to-html", key)),
        }
        Ok(())
    }
}

/// Convert Markdown to HTML.
pub fn markdown_to_html(source: &str, options: &MarkdownOptions) -> String {
    let source = normalize_newlines(source);
    if source.trim().is_empty() {
        return String::new();
    }

    if options.escape_markdown {
        return render_escaped(&source, &options.css_class);
    }

    let doc = blocks::parse_document(&source, options.max_quote_depth);
    log::debug!(
        "markdown: {} top-level blocks, {} footnotes",
        doc.blocks.len(),
        doc.footnotes.len()
    );
    HtmlRenderer::new(&options.css_class).render_document(&doc)
}

fn render_escaped(source: &str, class: &str) -> String {
    let protected = Protected::extract(source);
    let body = protected.restore(class, escape_markdown);
    format!("<p{}>{}</p>", class_attr(class), body.trim())
}

/// Converter for Markdown → HTML
#[derive(Debug, Clone, Default)]
pub struct MarkdownToHtml {
    options: MarkdownOptions,
}

impl MarkdownToHtml {
    pub fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MarkdownOptions {
        &self.options
    }
}

impl Converter for MarkdownToHtml {
    fn name(&self) -> &str {
        "markdown-to-html"
    }

    fn description(&self) -> &str {
        "Markdown with GFM tables, task lists and footnotes to HTML"
    }

    fn source(&self) -> Markup {
        Markup::Markdown
    }

    fn target(&self) -> Markup {
        Markup::Html
    }

    fn convert(&self, source: &str) -> String {
        markdown_to_html(source, &self.options)
    }

    fn convert_with_options(
        &self,
        source: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut merged = self.options.clone();
        for (key, value) in options {
            merged.set(key, value)?;
        }
        Ok(markdown_to_html(source, &merged))
    }
}
