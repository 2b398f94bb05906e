//! HTML → plain text scanner
//!
//! One forward pass over the input. Text is emitted only inside the body:
//! once an opening `<body` tag is seen, or from the start when the input has
//! no `<body` tag at all. `script`, `style`, and `head` content is skipped up
//! to the matching closing tag. Whitespace collapses to single spaces outside
//! `<pre>`.
//!
//! | HTML                     | Text                                 |
//! |--------------------------|--------------------------------------|
//! | `<a href="u">text</a>`   | `text: u`                            |
//! | `<ul><li>`               | newline, indent, `- `                |
//! | `<ol><li>`               | newline, indent, `1) `, `2) `, ...   |
//! | `<br>`                   | newline                              |
//! | `</p>`                   | blank line                           |
//! | headings, `div`, `tr`    | line breaks                          |
//! | `</td>`, `</th>`         | tab                                  |
//! | comments                 | nothing                              |

use super::tags::attribute;
use crate::common::escape::decode_entities;
use crate::common::text::{finish, normalize_newlines};
use crate::format::{Converter, Markup};

/// Convert HTML to readable plain text.
pub fn html_to_plain_text(html: &str) -> String {
    let html = normalize_newlines(html);
    if html.trim().is_empty() {
        return String::new();
    }

    let starts_in_body = !html.to_ascii_lowercase().contains("<body");
    let mut scanner = Scanner::new(starts_in_body);
    scanner.scan(&html);
    scanner.finish()
}

#[derive(Debug, Clone, Copy)]
struct ListFrame {
    ordered: bool,
    counter: usize,
}

#[derive(Debug, Default)]
struct Scanner {
    out: String,
    in_body: bool,
    ignore_until: Option<String>,
    anchor: Option<(String, usize)>,
    lists: Vec<ListFrame>,
    pre_depth: usize,
    pending_space: bool,
}

struct Tag<'a> {
    name: String,
    closing: bool,
    attrs: &'a str,
}

impl Scanner {
    fn new(in_body: bool) -> Self {
        Scanner {
            in_body,
            ..Scanner::default()
        }
    }

    fn scan(&mut self, html: &str) {
        let mut pos = 0;
        while pos < html.len() {
            let rest = &html[pos..];
            if rest.starts_with("<!--") {
                pos += rest.find("-->").map_or(rest.len(), |end| end + 3);
                continue;
            }
            if let Some((tag, len)) = parse_tag(rest) {
                self.tag(&tag);
                pos += len;
                continue;
            }
            // Text up to the next '<' that could open a tag.
            let first = rest.chars().next().map_or(1, char::len_utf8);
            let next = rest[first..]
                .find('<')
                .map_or(rest.len(), |offset| offset + first);
            self.text(&rest[..next]);
            pos += next;
        }
    }

    fn emitting(&self) -> bool {
        self.in_body && self.ignore_until.is_none()
    }

    fn text(&mut self, text: &str) {
        if !self.emitting() {
            return;
        }
        if self.pre_depth > 0 {
            self.out.push_str(text);
            self.pending_space = false;
            return;
        }
        for ch in text.chars() {
            if ch.is_whitespace() {
                self.pending_space = true;
                continue;
            }
            if self.pending_space && !self.out.is_empty() && !self.out.ends_with(char::is_whitespace)
            {
                self.out.push(' ');
            }
            self.pending_space = false;
            self.out.push(ch);
        }
    }

    fn push(&mut self, text: &str) {
        if self.emitting() {
            self.out.push_str(text);
            self.pending_space = false;
        }
    }

    fn tag(&mut self, tag: &Tag<'_>) {
        if let Some(ignored) = &self.ignore_until {
            if tag.closing && tag.name == *ignored {
                self.ignore_until = None;
            }
            return;
        }

        match (tag.name.as_str(), tag.closing) {
            ("body", false) => self.in_body = true,
            ("body", true) => self.in_body = false,
            ("script" | "style" | "head", false) => self.ignore_until = Some(tag.name.clone()),
            ("a", false) => {
                let href = attribute(tag.attrs, "href").unwrap_or_default();
                self.anchor = Some((href, self.out.len()));
            }
            ("a", true) => self.close_anchor(),
            ("ul" | "ol", false) => self.lists.push(ListFrame {
                ordered: tag.name == "ol",
                counter: 1,
            }),
            ("ul" | "ol", true) => {
                self.lists.pop();
                self.push("\n");
            }
            ("li", false) => self.list_item(),
            ("br", _) | ("hr", _) => self.push("\n"),
            ("p", true) => self.push("\n\n"),
            ("pre", false) => {
                self.push("\n");
                self.pre_depth += 1;
            }
            ("pre", true) => {
                self.pre_depth = self.pre_depth.saturating_sub(1);
                self.push("\n");
            }
            ("td" | "th", true) => self.push("\t"),
            ("h1" | "h2" | "h3" | "h4" | "h5" | "h6", _) => self.push("\n"),
            ("div" | "tr" | "table", true) => self.push("\n"),
            _ => {}
        }
    }

    fn close_anchor(&mut self) {
        let Some((href, start)) = self.anchor.take() else {
            return;
        };
        if href.is_empty() || !self.emitting() {
            return;
        }
        let has_text = self
            .out
            .get(start..)
            .map_or(false, |text| !text.trim().is_empty());
        if has_text {
            self.push(&format!(": {href}"));
        } else {
            self.text(&href);
        }
    }

    fn list_item(&mut self) {
        let depth = self.lists.len().saturating_sub(1);
        let marker = match self.lists.last_mut() {
            Some(frame) if frame.ordered => {
                let marker = format!("{}) ", frame.counter);
                frame.counter += 1;
                marker
            }
            _ => "- ".to_string(),
        };
        self.push(&format!("\n{}{marker}", "  ".repeat(depth)));
    }

    fn finish(self) -> String {
        let decoded = decode_entities(&self.out);
        let lines: Vec<&str> = decoded.lines().map(str::trim_end).collect();
        finish(&lines.join("\n"))
    }
}

/// Parse a tag at the start of `input`, returning it and its byte length.
///
/// Anything that does not look like a tag (`a < b`, an unterminated `<x`) is
/// left for the text path.
fn parse_tag(input: &str) -> Option<(Tag<'_>, usize)> {
    let body = input.strip_prefix('<')?;
    let first = body.chars().next()?;
    if !(first.is_ascii_alphabetic() || first == '/' || first == '!') {
        return None;
    }
    let end = body.find('>')?;
    let inner = &body[..end];

    let (closing, inner) = match inner.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, inner),
    };
    let name_len = inner
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(inner.len());
    let tag = Tag {
        name: inner[..name_len].to_ascii_lowercase(),
        closing,
        attrs: &inner[name_len..],
    };
    Some((tag, end + 2))
}

/// Converter for HTML → plain text
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlToPlainText;

impl Converter for HtmlToPlainText {
    fn name(&self) -> &str {
        "html-to-text"
    }

    fn description(&self) -> &str {
        "HTML to readable plain text"
    }

    fn source(&self) -> Markup {
        Markup::Html
    }

    fn target(&self) -> Markup {
        Markup::PlainText
    }

    fn convert(&self, source: &str) -> String {
        html_to_plain_text(source)
    }
}
