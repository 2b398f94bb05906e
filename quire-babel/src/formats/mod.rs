//! Converter implementations, one module per source markup

pub mod html;
pub mod markdown;
pub mod plain;

pub use html::{html_to_markdown, html_to_plain_text, HtmlToMarkdown, HtmlToPlainText, TagMapping};
pub use markdown::{markdown_to_html, MarkdownOptions, MarkdownToHtml};
pub use plain::{
    plain_text_to_html, plain_text_to_markdown, Locale, PlainHtmlOptions, PlainTextToHtml,
    PlainTextToMarkdown,
};
