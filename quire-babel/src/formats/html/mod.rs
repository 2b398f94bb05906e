//! HTML source converters
//!
//! Two converters read HTML:
//!
//! - [`HtmlToMarkdown`] parses the markup with `html5ever` and renders each
//!   element through a [`TagRuleSet`]: caller supplied [`TagMapping`]
//!   records first, then the built-in rules. No mapping list is built in;
//!   the configuration layer ships one.
//! - [`HtmlToPlainText`] is a single-pass scanner producing readable text
//!   without building a tree.
//!
//! Malformed input degrades in both: the parser repairs what it can, the
//! scanner drops unmatched tags, and text always survives.

pub mod dom;
pub mod rules;
pub mod tags;
pub mod to_markdown;
pub mod to_plain;

pub use dom::{Child, Element, Rendered};
pub use rules::{special_rules, MappingRule, TagMapping, TagRule, TagRuleSet};
pub use to_markdown::{html_to_markdown, HtmlToMarkdown};
pub use to_plain::{html_to_plain_text, HtmlToPlainText};
