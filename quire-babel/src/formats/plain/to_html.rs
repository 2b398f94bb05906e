//! Plain text → HTML formatting
//!
//! Lines of one paragraph are joined with `<br>`; a blank line closes the
//! paragraph. Lines starting with `- ` or `• ` build a `<ul>`, lines starting
//! with `1. ` or `1) ` build an `<ol>`; a list closes any open paragraph and
//! the other list type. Tab-delimited lines build a `<table>` whose first row
//! is the header.
//!
//! Text is escaped first, then the locale rule binds one-letter prepositions
//! with `&nbsp;`, then URLs and e-mail addresses are linked in one pass.
//! Leading spaces become `&nbsp;` so indentation survives.

use super::locale::Locale;
use crate::common::escape::escape_html;
use crate::common::tabular::{is_table_line, TabTable};
use crate::common::text::normalize_newlines;
use crate::error::FormatError;
use crate::format::{parse_bool_option, unknown_option, Converter, Markup};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

static BULLET_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-•] (.*)$").unwrap());
static ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+[.)] (.*)$").unwrap());
static AUTOLINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<url>https?://(?:[^\s<>&]|&amp;)+)|(?P<email>[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,})")
        .unwrap()
});
static BETWEEN_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r">\s+<").unwrap());

/// Trailing characters that end a sentence rather than a URL.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')'];

/// Options for plain text → HTML formatting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlainHtmlOptions {
    /// Remove whitespace between tags and all newlines
    pub minify: bool,
    pub locale: Locale,
}

impl PlainHtmlOptions {
    pub fn minified(mut self) -> Self {
        self.minify = true;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Apply one string-keyed override.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), FormatError> {
        match key {
            "minify" => self.minify = parse_bool_option(key, value)?,
            "locale" => self.locale = Locale::from_name(value)?,
            _ => return Err(unknown_option("text-to-html", key)),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Bullet,
    Ordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            ListKind::Bullet => "ul",
            ListKind::Ordered => "ol",
        }
    }
}

struct Formatter {
    locale: Locale,
    out: Vec<String>,
    paragraph: Vec<String>,
    list: Option<ListKind>,
    table: Option<TabTable>,
}

impl Formatter {
    fn new(locale: Locale) -> Self {
        Formatter {
            locale,
            out: Vec::new(),
            paragraph: Vec::new(),
            list: None,
            table: None,
        }
    }

    fn line(&mut self, line: &str) {
        if is_table_line(line) {
            self.close_paragraph();
            self.close_list();
            self.table_row(line);
            return;
        }
        self.close_table();

        if line.trim().is_empty() {
            self.close_paragraph();
            self.close_list();
        } else if let Some(caps) = BULLET_ITEM.captures(line) {
            self.list_item(ListKind::Bullet, &caps[1]);
        } else if let Some(caps) = ORDERED_ITEM.captures(line) {
            self.list_item(ListKind::Ordered, &caps[1]);
        } else {
            self.close_list();
            let rendered = self.indented(line);
            self.paragraph.push(rendered);
        }
    }

    fn list_item(&mut self, kind: ListKind, text: &str) {
        self.close_paragraph();
        if self.list != Some(kind) {
            self.close_list();
            self.out.push(format!("<{}>", kind.tag()));
            self.list = Some(kind);
        }
        let item = self.inline(text);
        self.out.push(format!("<li>{item}</li>"));
    }

    fn table_row(&mut self, line: &str) {
        let (cells, cell_tag) = match self.table.as_ref().map(|table| table.row(line)) {
            Some(cells) => (cells, "td"),
            None => {
                let (table, header) = TabTable::open(line);
                self.table = Some(table);
                self.out.push("<table>".to_string());
                (header, "th")
            }
        };
        let mut row = String::from("<tr>");
        for cell in &cells {
            row.push_str(&format!("<{cell_tag}>{}</{cell_tag}>", self.inline(cell)));
        }
        row.push_str("</tr>");
        self.out.push(row);
    }

    fn close_paragraph(&mut self) {
        if !self.paragraph.is_empty() {
            let body = self.paragraph.join("<br>\n");
            self.out.push(format!("<p>{body}</p>"));
            self.paragraph.clear();
        }
    }

    fn close_list(&mut self) {
        if let Some(kind) = self.list.take() {
            self.out.push(format!("</{}>", kind.tag()));
        }
    }

    fn close_table(&mut self) {
        if self.table.take().is_some() {
            self.out.push("</table>".to_string());
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.close_table();
        self.close_paragraph();
        self.close_list();
        self.out
    }

    fn indented(&self, line: &str) -> String {
        let rest = line.trim_start_matches(' ');
        let indent = line.len() - rest.len();
        format!("{}{}", "&nbsp;".repeat(indent), self.inline(rest))
    }

    fn inline(&self, text: &str) -> String {
        let escaped = escape_html(text);
        let bound = self.locale.bind_prepositions(&escaped);
        autolink(&bound)
    }
}

/// Link bare `http(s)://` URLs and e-mail addresses in escaped text.
pub fn autolink(text: &str) -> String {
    AUTOLINK
        .replace_all(text, |caps: &Captures| {
            if let Some(url) = caps.name("url") {
                let url = url.as_str();
                let link = url.trim_end_matches(TRAILING_PUNCTUATION);
                let tail = &url[link.len()..];
                format!("<a href=\"{link}\">{link}</a>{tail}")
            } else {
                let email = &caps[0];
                format!("<a href=\"mailto:{email}\">{email}</a>")
            }
        })
        .into_owned()
}

/// Format plain text as HTML.
pub fn plain_text_to_html(text: &str, options: &PlainHtmlOptions) -> String {
    let text = normalize_newlines(text);
    if text.trim().is_empty() {
        return String::new();
    }

    let mut formatter = Formatter::new(options.locale);
    for line in text.lines() {
        formatter.line(line);
    }
    let html = formatter.finish().join("\n");

    if options.minify {
        BETWEEN_TAGS.replace_all(&html, "><").replace('\n', "")
    } else {
        html
    }
}

/// Converter for plain text → HTML
#[derive(Debug, Clone, Default)]
pub struct PlainTextToHtml {
    options: PlainHtmlOptions,
}

impl PlainTextToHtml {
    pub fn new(options: PlainHtmlOptions) -> Self {
        PlainTextToHtml { options }
    }

    pub fn options(&self) -> &PlainHtmlOptions {
        &self.options
    }
}

impl Converter for PlainTextToHtml {
    fn name(&self) -> &str {
        "text-to-html"
    }

    fn description(&self) -> &str {
        "Plain text to HTML paragraphs, lists and tables"
    }

    fn source(&self) -> Markup {
        Markup::PlainText
    }

    fn target(&self) -> Markup {
        Markup::Html
    }

    fn convert(&self, source: &str) -> String {
        plain_text_to_html(source, &self.options)
    }

    fn convert_with_options(
        &self,
        source: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut merged = self.options;
        for (key, value) in options {
            merged.set(key, value)?;
        }
        Ok(plain_text_to_html(source, &merged))
    }
}
