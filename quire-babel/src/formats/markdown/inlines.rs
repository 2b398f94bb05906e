//! Inline tokenizer
//!
//! Inline syntax is recognized by an ordered list of rules. Parsing starts
//! from a single text node. Each rule in turn matches over the current run of
//! sibling nodes: text is matched as-is and every node an earlier rule
//! produced stands in as one opaque character. A match may therefore enclose
//! claimed nodes (`**use `x` now**` is strong around a code span), but its
//! delimiters always come from unclaimed text and it never looks inside a
//! claimed node. Rules also recurse into the children of container nodes
//! (strong, emphasis, strikethrough, link text).
//!
//! Groups that become node children (link text, strong, emphasis,
//! strikethrough) keep the claimed nodes they enclose. Groups that become
//! plain strings (code, image alt and src, hrefs, titles, footnote ids,
//! superscript, subscript) must not enclose any, or the match is left alone.
//!
//! The order is the precedence:
//!
//! | Rule           | Syntax              | Why it sits here                                |
//! |----------------|---------------------|-------------------------------------------------|
//! | footnote-ref   | `[^id]`             | must win over the link rule                     |
//! | code-span      | `` `code` ``        | code content is opaque to everything after it   |
//! | image          | `![alt](src)`       | before links: a link matches the image tail     |
//! | link           | `[text](href)`      |                                                 |
//! | strong         | `**x**` / `__x__`   | before emphasis so `**x**` is not nested `*`    |
//! | emphasis       | `*x*` / `_x_`       | `_` needs word boundaries                       |
//! | strikethrough  | `~~x~~`             | before subscript                                |
//! | superscript    | `^x^`               | single word                                     |
//! | subscript      | `~x~`               | single word                                     |

use crate::ir::nodes::Inline;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::ops::Range;

/// Stands in for a claimed node while a rule matches over a run.
///
/// Not a word character, not whitespace, and not a delimiter of any rule.
/// Literal occurrences in the input stay text: pieces are told apart by
/// position, never by this character.
const CLAIMED: char = '\u{FFFC}';

struct InlineRule {
    name: &'static str,
    pattern: Regex,
    build: fn(&mut Found) -> Option<Inline>,
}

impl InlineRule {
    fn new(name: &'static str, pattern: &str, build: fn(&mut Found) -> Option<Inline>) -> Self {
        InlineRule {
            name,
            pattern: Regex::new(pattern).unwrap(),
            build,
        }
    }
}

static RULES: Lazy<Vec<InlineRule>> = Lazy::new(|| {
    vec![
        InlineRule::new("footnote-ref", r"\[\^([^\]\s]+)\]", |found| {
            Some(Inline::FootnoteRef(found.text(1)?))
        }),
        InlineRule::new("code-span", r"`([^`]+)`", |found| {
            Some(Inline::Code(found.text(1)?))
        }),
        InlineRule::new(
            "image",
            r#"!\[([^\]]*)\]\(\s*([^)\s]+)(?:\s+"([^"]*)")?\s*\)"#,
            |found| {
                Some(Inline::Image {
                    alt: found.text(1)?,
                    src: found.text(2)?,
                    title: found.optional_text(3)?,
                })
            },
        ),
        InlineRule::new(
            "link",
            r#"\[([^\]]+)\]\(\s*([^)\s]+)(?:\s+"([^"]*)")?\s*\)"#,
            |found| {
                Some(Inline::Link {
                    href: found.text(2)?,
                    title: found.optional_text(3)?,
                    content: found.nodes(1),
                })
            },
        ),
        InlineRule::new("strong", r"\*\*(.+?)\*\*|__(.+?)__", |found| {
            Some(Inline::Strong(found.either_nodes()))
        }),
        InlineRule::new(
            "emphasis",
            r"\*([^*\s](?:[^*]*[^*\s])?)\*|\b_([^_]+)_\b",
            |found| Some(Inline::Emphasis(found.either_nodes())),
        ),
        InlineRule::new("strikethrough", r"~~(.+?)~~", |found| {
            Some(Inline::Strike(found.nodes(1)))
        }),
        InlineRule::new("superscript", r"\^([^\s^]+)\^", |found| {
            Some(Inline::Superscript(found.text(1)?))
        }),
        InlineRule::new("subscript", r"~([^\s~]+)~", |found| {
            Some(Inline::Subscript(found.text(1)?))
        }),
    ]
});

/// Names of the inline rules in precedence order.
pub fn rule_names() -> Vec<&'static str> {
    RULES.iter().map(|rule| rule.name).collect()
}

/// Tokenize one line of inline Markdown.
pub fn parse_inlines(text: &str) -> Vec<Inline> {
    let mut nodes = vec![Inline::Text(text.to_string())];
    for rule in RULES.iter() {
        nodes = apply_rule(nodes, rule);
    }
    nodes
}

fn apply_rule(nodes: Vec<Inline>, rule: &InlineRule) -> Vec<Inline> {
    let nodes: Vec<Inline> = nodes
        .into_iter()
        .map(|node| descend(node, rule))
        .collect();
    Run::new(nodes).split(rule)
}

fn descend(node: Inline, rule: &InlineRule) -> Inline {
    match node {
        Inline::Strong(children) => Inline::Strong(apply_rule(children, rule)),
        Inline::Emphasis(children) => Inline::Emphasis(apply_rule(children, rule)),
        Inline::Strike(children) => Inline::Strike(apply_rule(children, rule)),
        Inline::Link {
            content,
            href,
            title,
        } => Inline::Link {
            content: apply_rule(content, rule),
            href,
            title,
        },
        other => other,
    }
}

/// A run of sibling nodes flattened into one matchable string.
struct Run {
    flat: String,
    /// Claimed nodes with the byte offset of their stand-in, in order.
    claimed: Vec<(usize, Option<Inline>)>,
}

impl Run {
    fn new(nodes: Vec<Inline>) -> Self {
        let mut flat = String::new();
        let mut claimed = Vec::new();
        for node in nodes {
            match node {
                Inline::Text(text) => flat.push_str(&text),
                other => {
                    claimed.push((flat.len(), Some(other)));
                    flat.push(CLAIMED);
                }
            }
        }
        Run { flat, claimed }
    }

    fn split(mut self, rule: &InlineRule) -> Vec<Inline> {
        let flat = std::mem::take(&mut self.flat);
        let mut out = Vec::new();
        let mut last = 0;
        for caps in rule.pattern.captures_iter(&flat) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let mut found = Found {
                caps: &caps,
                flat: &flat,
                run: &mut self,
            };
            let Some(node) = (rule.build)(&mut found) else {
                continue;
            };
            self.drain(&flat, last..whole.start(), &mut out);
            last = whole.end();
            out.push(node);
        }
        self.drain(&flat, last..flat.len(), &mut out);
        out
    }

    fn intersects_claimed(&self, range: &Range<usize>) -> bool {
        self.claimed
            .iter()
            .any(|(offset, _)| range.contains(offset))
    }

    /// Move the pieces covering `range` into `out`, merging adjacent text.
    fn drain(&mut self, flat: &str, range: Range<usize>, out: &mut Vec<Inline>) {
        let mut cursor = range.start;
        for (offset, node) in self.claimed.iter_mut() {
            if *offset < range.start || *offset >= range.end {
                continue;
            }
            push_text(out, &flat[cursor..*offset]);
            if let Some(node) = node.take() {
                out.push(node);
            }
            cursor = *offset + CLAIMED.len_utf8();
        }
        push_text(out, &flat[cursor..range.end]);
    }
}

/// One match of a rule over a [`Run`].
struct Found<'a> {
    caps: &'a Captures<'a>,
    flat: &'a str,
    run: &'a mut Run,
}

impl Found<'_> {
    /// Plain text of a group; `None` when the group encloses a claimed node.
    fn text(&self, index: usize) -> Option<String> {
        let range = self.caps.get(index).map_or(0..0, |m| m.range());
        if self.run.intersects_claimed(&range) {
            return None;
        }
        Some(self.flat[range].to_string())
    }

    /// Like [`Found::text`] for an optional group.
    fn optional_text(&self, index: usize) -> Option<Option<String>> {
        match self.caps.get(index) {
            Some(_) => self.text(index).map(Some),
            None => Some(None),
        }
    }

    /// The nodes a group encloses, claimed ones included.
    fn nodes(&mut self, index: usize) -> Vec<Inline> {
        let mut out = Vec::new();
        if let Some(group) = self.caps.get(index) {
            self.run.drain(self.flat, group.range(), &mut out);
        }
        out
    }

    fn either_nodes(&mut self) -> Vec<Inline> {
        if self.caps.get(1).is_some() {
            self.nodes(1)
        } else {
            self.nodes(2)
        }
    }
}

fn push_text(out: &mut Vec<Inline>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Inline::Text(previous)) = out.last_mut() {
        previous.push_str(text);
    } else {
        out.push(Inline::Text(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    #[test]
    fn rules_run_in_precedence_order() {
        assert_eq!(
            rule_names(),
            vec![
                "footnote-ref",
                "code-span",
                "image",
                "link",
                "strong",
                "emphasis",
                "strikethrough",
                "superscript",
                "subscript",
            ]
        );
    }

    #[test]
    fn strong_before_emphasis() {
        assert_eq!(
            parse_inlines("**bold** and *italic*"),
            vec![
                Inline::Strong(vec![text("bold")]),
                text(" and "),
                Inline::Emphasis(vec![text("italic")]),
            ]
        );
    }

    #[test]
    fn image_before_link() {
        assert_eq!(
            parse_inlines("![logo](logo.png)"),
            vec![Inline::Image {
                alt: "logo".to_string(),
                src: "logo.png".to_string(),
                title: None,
            }]
        );
    }

    #[test]
    fn link_with_title_and_nested_emphasis() {
        assert_eq!(
            parse_inlines(r#"[*docs*](https://x.io "Docs")"#),
            vec![Inline::Link {
                content: vec![Inline::Emphasis(vec![text("docs")])],
                href: "https://x.io".to_string(),
                title: Some("Docs".to_string()),
            }]
        );
    }

    #[test]
    fn code_span_is_opaque() {
        assert_eq!(
            parse_inlines("`**not bold**` text"),
            vec![Inline::Code("**not bold**".to_string()), text(" text")]
        );
    }

    #[test]
    fn footnote_ref_wins_over_link() {
        assert_eq!(
            parse_inlines("see[^1](x)"),
            vec![
                text("see"),
                Inline::FootnoteRef("1".to_string()),
                text("(x)"),
            ]
        );
    }

    #[test]
    fn underscore_emphasis_needs_word_boundaries() {
        assert_eq!(parse_inlines("snake_case_name"), vec![text("snake_case_name")]);
        assert_eq!(
            parse_inlines("an _em_ word"),
            vec![
                text("an "),
                Inline::Emphasis(vec![text("em")]),
                text(" word")
            ]
        );
    }

    #[test]
    fn spaced_asterisks_are_not_emphasis() {
        assert_eq!(parse_inlines("2 * 3 * 4"), vec![text("2 * 3 * 4")]);
    }

    #[test]
    fn superscript_and_subscript_are_single_words() {
        assert_eq!(
            parse_inlines("x^2^ and H~2~O"),
            vec![
                text("x"),
                Inline::Superscript("2".to_string()),
                text(" and H"),
                Inline::Subscript("2".to_string()),
                text("O"),
            ]
        );
        assert_eq!(parse_inlines("^not this^"), vec![text("^not this^")]);
    }

    #[test]
    fn strong_encloses_code_span() {
        assert_eq!(
            parse_inlines("**use `foo` now**"),
            vec![Inline::Strong(vec![
                text("use "),
                Inline::Code("foo".to_string()),
                text(" now"),
            ])]
        );
    }

    #[test]
    fn strong_encloses_link() {
        assert_eq!(
            parse_inlines("**see [docs](http://x)**"),
            vec![Inline::Strong(vec![
                text("see "),
                Inline::Link {
                    content: vec![text("docs")],
                    href: "http://x".to_string(),
                    title: None,
                },
            ])]
        );
    }

    #[test]
    fn emphasis_encloses_code_span_and_footnote_ref() {
        assert_eq!(
            parse_inlines("_call `f()` first_"),
            vec![Inline::Emphasis(vec![
                text("call "),
                Inline::Code("f()".to_string()),
                text(" first"),
            ])]
        );
        assert_eq!(
            parse_inlines("*note[^1]*"),
            vec![Inline::Emphasis(vec![
                text("note"),
                Inline::FootnoteRef("1".to_string()),
            ])]
        );
    }

    #[test]
    fn link_text_may_hold_code() {
        assert_eq!(
            parse_inlines("[the `run` call](#run)"),
            vec![Inline::Link {
                content: vec![text("the "), Inline::Code("run".to_string()), text(" call")],
                href: "#run".to_string(),
                title: None,
            }]
        );
    }

    #[test]
    fn string_groups_reject_claimed_nodes() {
        assert_eq!(
            parse_inlines("x^`a`^"),
            vec![text("x^"), Inline::Code("a".to_string()), text("^")]
        );
    }

    #[test]
    fn object_replacement_character_stays_text() {
        assert_eq!(
            parse_inlines("**a\u{FFFC}b** \u{FFFC}"),
            vec![
                Inline::Strong(vec![text("a\u{FFFC}b")]),
                text(" \u{FFFC}"),
            ]
        );
    }

    #[test]
    fn strikethrough_before_subscript() {
        assert_eq!(
            parse_inlines("~~gone~~"),
            vec![Inline::Strike(vec![text("gone")])]
        );
    }
}
