//! Tag rules for HTML → Markdown reduction
//!
//! A [`TagRuleSet`] maps each tag to the first [`TagRule`] that handles it.
//! Caller-supplied [`TagMapping`] records become generic [`MappingRule`]s and
//! are consulted first, in list order. The built-in rules follow in a fixed
//! order:
//!
//! | Rule              | Tags                          | Markdown                         |
//! |-------------------|-------------------------------|----------------------------------|
//! | `blockquote`      | `blockquote`                  | `> ` on every inner line         |
//! | `horizontal-rule` | `hr`                          | `---`                            |
//! | `preformatted`    | `pre`                         | fenced block, language detected  |
//! | `inline-code`     | `code`                        | `` `x` ``                        |
//! | `sup-sub`         | `sup`, `sub`                  | `^x^`, `~x~`                     |
//! | `bold`            | `b`                           | `**x**`                          |
//! | `lists`           | `ul`, `ol`, `li`              | `- x`, `1. x` renumbered         |
//! | `table`           | `table`, `tr`, `td`, `th`     | `\| a \| b \|` rows, no separator  |
//! | `links`           | `a`                           | `[text](href)`                   |
//! | `images`          | `img`                         | `![alt](src)`                    |
//! | `strip`           | anything left                 | inner text kept                  |
//!
//! Rules render one [`Element`] at a time, after its children (see
//! [`super::dom`]), so nested blockquotes and lists come out innermost first.

use super::dom::{reduce_dom, Child, Element};
use serde::{Deserialize, Serialize};

/// A declarative HTML tag → Markdown token rule.
///
/// Mappings marked `is_special` name a tag handled by a built-in rule and are
/// skipped by the generic pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagMapping {
    pub html_tag: String,
    pub markdown_token: String,
    #[serde(default)]
    pub requires_closing_tag: bool,
    #[serde(default)]
    pub is_prefix: bool,
    #[serde(default)]
    pub is_suffix: bool,
    #[serde(default)]
    pub is_special: bool,
}

impl TagMapping {
    /// `<tag>x</tag>` → `{token}x{token}`.
    pub fn wrap(tag: impl Into<String>, token: impl Into<String>) -> Self {
        TagMapping {
            html_tag: tag.into(),
            markdown_token: token.into(),
            requires_closing_tag: true,
            is_prefix: true,
            is_suffix: true,
            is_special: false,
        }
    }

    /// `<tag>x</tag>` → `{token}x`.
    pub fn prefix(tag: impl Into<String>, token: impl Into<String>) -> Self {
        TagMapping {
            is_suffix: false,
            ..TagMapping::wrap(tag, token)
        }
    }

    /// `<tag>` (void element) → `{token}`.
    pub fn replace(tag: impl Into<String>, token: impl Into<String>) -> Self {
        TagMapping {
            requires_closing_tag: false,
            is_suffix: false,
            ..TagMapping::wrap(tag, token)
        }
    }

    /// A tag left to the built-in rules.
    pub fn special(tag: impl Into<String>) -> Self {
        TagMapping {
            html_tag: tag.into(),
            markdown_token: String::new(),
            requires_closing_tag: false,
            is_prefix: false,
            is_suffix: false,
            is_special: true,
        }
    }
}

/// Renders the elements of the tags it handles as Markdown.
pub trait TagRule: Send + Sync {
    fn name(&self) -> &str;

    /// Whether this rule renders `tag` (lowercase name).
    fn handles(&self, tag: &str) -> bool;

    /// Markdown for one element whose children are already rendered.
    fn render(&self, element: &Element) -> String;
}

/// Generic rule built from one [`TagMapping`].
pub struct MappingRule {
    name: String,
    tag: String,
    mapping: TagMapping,
}

impl MappingRule {
    pub fn new(mapping: TagMapping) -> Self {
        let tag = mapping.html_tag.trim().to_ascii_lowercase();
        MappingRule {
            name: format!("mapping:{tag}"),
            tag,
            mapping,
        }
    }

    pub fn mapping(&self) -> &TagMapping {
        &self.mapping
    }
}

impl TagRule for MappingRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn handles(&self, tag: &str) -> bool {
        !self.tag.is_empty() && self.tag == tag
    }

    fn render(&self, element: &Element) -> String {
        let token = self.mapping.markdown_token.as_str();
        let inner = element.inner();

        // A void mapping replaces the opening tag; whatever the element holds follows it.
        if !self.mapping.requires_closing_tag {
            return format!("{token}{inner}");
        }
        let mut out = String::with_capacity(inner.len() + 2 * token.len());
        if self.mapping.is_prefix {
            out.push_str(token);
        }
        out.push_str(&inner);
        if self.mapping.is_suffix {
            out.push_str(token);
        }
        out
    }
}

struct BlockquoteRule;

impl TagRule for BlockquoteRule {
    fn name(&self) -> &str {
        "blockquote"
    }

    fn handles(&self, tag: &str) -> bool {
        tag == "blockquote"
    }

    fn render(&self, element: &Element) -> String {
        let quoted: Vec<String> = element
            .inner()
            .trim()
            .lines()
            .map(|line| {
                let line = line.trim();
                if line.is_empty() {
                    ">".to_string()
                } else {
                    format!("> {line}")
                }
            })
            .collect();
        format!("\n\n{}\n\n", quoted.join("\n"))
    }
}

struct HorizontalRule;

impl TagRule for HorizontalRule {
    fn name(&self) -> &str {
        "horizontal-rule"
    }

    fn handles(&self, tag: &str) -> bool {
        tag == "hr"
    }

    fn render(&self, _element: &Element) -> String {
        "\n\n---\n\n".to_string()
    }
}

struct PreformattedRule;

impl TagRule for PreformattedRule {
    fn name(&self) -> &str {
        "preformatted"
    }

    fn handles(&self, tag: &str) -> bool {
        tag == "pre"
    }

    /// Elements inside `pre` arrive as their text, so a nested `code` only
    /// contributes its language.
    fn render(&self, element: &Element) -> String {
        let lang = code_language(element.attr("data-lang"), element.attr("class"))
            .or_else(|| {
                element
                    .children_named("code")
                    .find_map(|code| code_language(code.attr("data-lang"), code.attr("class")))
            })
            .unwrap_or_default();
        format!(
            "\n\n```{lang}\n{}\n```\n\n",
            element.inner().trim_matches('\n')
        )
    }
}

/// Language named by `data-lang` or a `language-x` / `lang-x` class.
fn code_language(data_lang: Option<&str>, class: Option<&str>) -> Option<String> {
    if let Some(lang) = data_lang.filter(|lang| !lang.is_empty()) {
        return Some(lang.to_string());
    }
    class.and_then(|class| {
        class.split_whitespace().find_map(|name| {
            name.strip_prefix("language-")
                .or_else(|| name.strip_prefix("lang-"))
                .filter(|lang| !lang.is_empty())
                .map(str::to_string)
        })
    })
}

struct InlineCodeRule;

impl TagRule for InlineCodeRule {
    fn name(&self) -> &str {
        "inline-code"
    }

    fn handles(&self, tag: &str) -> bool {
        tag == "code"
    }

    fn render(&self, element: &Element) -> String {
        format!("`{}`", element.inner())
    }
}

struct SupSubRule;

impl TagRule for SupSubRule {
    fn name(&self) -> &str {
        "sup-sub"
    }

    fn handles(&self, tag: &str) -> bool {
        matches!(tag, "sup" | "sub")
    }

    fn render(&self, element: &Element) -> String {
        let marker = if element.name == "sup" { '^' } else { '~' };
        format!("{marker}{}{marker}", element.inner().trim())
    }
}

struct BoldRule;

impl TagRule for BoldRule {
    fn name(&self) -> &str {
        "bold"
    }

    fn handles(&self, tag: &str) -> bool {
        tag == "b"
    }

    fn render(&self, element: &Element) -> String {
        format!("**{}**", element.inner())
    }
}

struct ListRule;

impl TagRule for ListRule {
    fn name(&self) -> &str {
        "lists"
    }

    fn handles(&self, tag: &str) -> bool {
        matches!(tag, "ul" | "ol" | "li")
    }

    /// An `li` renders as its content; the enclosing list adds the markers.
    fn render(&self, element: &Element) -> String {
        if element.name == "li" {
            return element.inner();
        }
        let ordered = element.name == "ol";
        let items = element
            .children_named("li")
            .map(|item| item.output.trim())
            .filter(|item| !item.is_empty());

        let mut out = String::from("\n");
        for (index, item) in items.enumerate() {
            let marker = if ordered {
                format!("{}. ", index + 1)
            } else {
                "- ".to_string()
            };
            let indent = " ".repeat(marker.len());
            for (n, line) in item.lines().enumerate() {
                let line = line.trim_end();
                if n == 0 {
                    out.push_str(&marker);
                } else if line.trim().is_empty() {
                    continue;
                } else {
                    out.push_str(&indent);
                }
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }
}

struct TableRule;

impl TagRule for TableRule {
    fn name(&self) -> &str {
        "table"
    }

    fn handles(&self, tag: &str) -> bool {
        matches!(
            tag,
            "table" | "thead" | "tbody" | "tfoot" | "tr" | "td" | "th"
        )
    }

    /// Cells collapse their whitespace, rows become pipe rows, and sections
    /// and the table collect the rows they hold.
    fn render(&self, element: &Element) -> String {
        match element.name.as_str() {
            "td" | "th" => element.inner().split_whitespace().collect::<Vec<_>>().join(" "),
            "tr" => {
                let cells: Vec<&str> = element
                    .children
                    .iter()
                    .filter_map(|child| match child {
                        Child::Element(cell) if cell.name == "td" || cell.name == "th" => {
                            Some(cell.output.as_str())
                        }
                        _ => None,
                    })
                    .collect();
                if cells.is_empty() {
                    String::new()
                } else {
                    format!("| {} |", cells.join(" | "))
                }
            }
            section => {
                let rows: Vec<&str> = element
                    .children
                    .iter()
                    .filter_map(|child| match child {
                        Child::Element(row)
                            if matches!(row.name.as_str(), "tr" | "thead" | "tbody" | "tfoot") =>
                        {
                            Some(row.output.trim_matches('\n'))
                        }
                        _ => None,
                    })
                    .filter(|row| !row.is_empty())
                    .collect();
                if section == "table" {
                    format!("\n\n{}\n\n", rows.join("\n"))
                } else {
                    rows.join("\n")
                }
            }
        }
    }
}

struct LinkRule;

impl TagRule for LinkRule {
    fn name(&self) -> &str {
        "links"
    }

    fn handles(&self, tag: &str) -> bool {
        tag == "a"
    }

    fn render(&self, element: &Element) -> String {
        let inner = element.inner();
        let text = inner.trim();
        match element.attr("href").filter(|href| !href.is_empty()) {
            Some(href) if text.is_empty() => format!("[{href}]({href})"),
            Some(href) => format!("[{text}]({href})"),
            None => text.to_string(),
        }
    }
}

struct ImageRule;

impl TagRule for ImageRule {
    fn name(&self) -> &str {
        "images"
    }

    fn handles(&self, tag: &str) -> bool {
        tag == "img"
    }

    fn render(&self, element: &Element) -> String {
        match element.attr("src").filter(|src| !src.is_empty()) {
            Some(src) => format!("![{}]({src})", element.attr("alt").unwrap_or_default()),
            None => String::new(),
        }
    }
}

struct StripRule;

impl TagRule for StripRule {
    fn name(&self) -> &str {
        "strip"
    }

    fn handles(&self, _tag: &str) -> bool {
        true
    }

    fn render(&self, element: &Element) -> String {
        element.inner()
    }
}

/// The built-in rules in application order.
pub fn special_rules() -> Vec<Box<dyn TagRule>> {
    vec![
        Box::new(BlockquoteRule),
        Box::new(HorizontalRule),
        Box::new(PreformattedRule),
        Box::new(InlineCodeRule),
        Box::new(SupSubRule),
        Box::new(BoldRule),
        Box::new(ListRule),
        Box::new(TableRule),
        Box::new(LinkRule),
        Box::new(ImageRule),
        Box::new(StripRule),
    ]
}

/// Generic mapping rules followed by the built-in rules.
pub struct TagRuleSet {
    rules: Vec<Box<dyn TagRule>>,
}

impl TagRuleSet {
    pub fn new(mappings: &[TagMapping]) -> Self {
        let mut rules: Vec<Box<dyn TagRule>> = mappings
            .iter()
            .filter(|mapping| !mapping.is_special)
            .map(|mapping| Box::new(MappingRule::new(mapping.clone())) as Box<dyn TagRule>)
            .collect();
        rules.extend(special_rules());
        TagRuleSet { rules }
    }

    /// Rule names in lookup order.
    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    pub fn rule(&self, name: &str) -> Option<&dyn TagRule> {
        self.rules
            .iter()
            .find(|rule| rule.name() == name)
            .map(|rule| rule.as_ref())
    }

    /// The first rule that renders `tag`.
    pub fn rule_for(&self, tag: &str) -> Option<&dyn TagRule> {
        let tag = tag.to_ascii_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.handles(&tag))
            .map(|rule| rule.as_ref())
    }

    /// Parse `html` and render every element with its rule.
    pub fn apply(&self, html: &str) -> String {
        reduce_dom(html, self)
    }
}

impl Default for TagRuleSet {
    fn default() -> Self {
        TagRuleSet::new(&[])
    }
}
