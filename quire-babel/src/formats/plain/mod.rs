//! Plain text source converters
//!
//! - [`PlainTextToMarkdown`] gives plain text a Markdown structure by line
//!   heuristics.
//! - [`PlainTextToHtml`] formats paragraphs, lists, and tab tables as HTML,
//!   with a pluggable [`Locale`] typography rule.
//!
//! Both share the tab-delimited row model in [`crate::common::tabular`].

pub mod locale;
pub mod to_html;
pub mod to_markdown;

pub use locale::Locale;
pub use to_html::{autolink, plain_text_to_html, PlainHtmlOptions, PlainTextToHtml};
pub use to_markdown::{plain_text_to_markdown, PlainTextToMarkdown};
