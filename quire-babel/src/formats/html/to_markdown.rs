//! HTML → Markdown converter

use super::rules::{TagMapping, TagRuleSet};
use crate::common::text::{finish, normalize_newlines};
use crate::format::{Converter, Markup};

/// Convert HTML to Markdown with the given mapping records.
///
/// The mapping list is compiled on every call; keep an [`HtmlToMarkdown`]
/// around to reuse it.
pub fn html_to_markdown(html: &str, mappings: &[TagMapping]) -> String {
    reduce(html, &TagRuleSet::new(mappings))
}

fn reduce(html: &str, rules: &TagRuleSet) -> String {
    let html = normalize_newlines(html);
    if html.trim().is_empty() {
        return String::new();
    }
    let reduced = rules.apply(&html);
    let tidy: Vec<&str> = reduced.lines().map(str::trim_end).collect();
    finish(&tidy.join("\n"))
}

/// Converter for HTML → Markdown driven by a [`TagRuleSet`]
#[derive(Default)]
pub struct HtmlToMarkdown {
    mappings: Vec<TagMapping>,
    rules: TagRuleSet,
}

impl HtmlToMarkdown {
    pub fn new(mappings: Vec<TagMapping>) -> Self {
        let rules = TagRuleSet::new(&mappings);
        HtmlToMarkdown { mappings, rules }
    }

    pub fn mappings(&self) -> &[TagMapping] {
        &self.mappings
    }

    pub fn rules(&self) -> &TagRuleSet {
        &self.rules
    }
}

impl std::fmt::Debug for HtmlToMarkdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlToMarkdown")
            .field("rules", &self.rules.names())
            .finish()
    }
}

impl Converter for HtmlToMarkdown {
    fn name(&self) -> &str {
        "html-to-markdown"
    }

    fn description(&self) -> &str {
        "HTML to Markdown through tag mapping rules"
    }

    fn source(&self) -> Markup {
        Markup::Html
    }

    fn target(&self) -> Markup {
        Markup::Markdown
    }

    fn convert(&self, source: &str) -> String {
        reduce(source, &self.rules)
    }
}
