//! Shared helpers for the integration tests.

use quire_babel::{markdown_to_html, MarkdownOptions, TagMapping};

/// Markdown → HTML with default options.
pub fn md(source: &str) -> String {
    markdown_to_html(source, &MarkdownOptions::default())
}

/// The mapping list most HTML → Markdown tests run with.
pub fn mappings() -> Vec<TagMapping> {
    vec![
        TagMapping::wrap("strong", "**"),
        TagMapping::wrap("em", "*"),
        TagMapping::wrap("i", "*"),
        TagMapping::wrap("del", "~~"),
        TagMapping::prefix("h1", "\n\n# "),
        TagMapping::prefix("h2", "\n\n## "),
        TagMapping::prefix("h3", "\n\n### "),
        TagMapping::wrap("p", "\n\n"),
        TagMapping::replace("br", "\n"),
        TagMapping::special("blockquote"),
        TagMapping::special("pre"),
        TagMapping::special("a"),
    ]
}
