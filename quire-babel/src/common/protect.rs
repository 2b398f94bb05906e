//! Protected-block extraction
//!
//! Fenced code blocks and top-level raw markup blocks must never be
//! re-interpreted by the Markdown rules. Rather than splicing sentinel tokens
//! into the buffer and restoring them afterwards, extraction splits the source
//! into an ordered list of [`Segment`]s. Text segments go through the
//! rewriting rules; protected segments are rendered as-is at their position.
//! Nothing in the input can collide with a protected block.
//!
//! A fenced code block opens on a line starting with three backticks and an
//! optional language tag, and closes on the next line made only of backticks.
//! A raw markup block opens at the start of a line with a block-level tag and
//! runs to the first matching closing tag for that name. HTML comments
//! starting a line are protected the same way. Unterminated blocks are left as
//! text.

use crate::common::escape::escape_html;

/// Tag names that open a raw markup block when they start a line.
const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "audio",
    "blockquote",
    "canvas",
    "details",
    "div",
    "dl",
    "fieldset",
    "figure",
    "footer",
    "form",
    "header",
    "iframe",
    "nav",
    "ol",
    "p",
    "pre",
    "script",
    "section",
    "style",
    "svg",
    "table",
    "ul",
    "video",
];

/// One piece of an extracted document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text still subject to the conversion rules
    Text(&'a str),
    /// Fenced code block with its optional language tag and raw body
    Code { lang: Option<String>, body: String },
    /// Raw markup passed through verbatim
    Markup(&'a str),
}

/// A source split into text and protected segments, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Protected<'a> {
    segments: Vec<Segment<'a>>,
}

impl<'a> Protected<'a> {
    /// Split `source` into text and protected segments.
    pub fn extract(source: &'a str) -> Self {
        let mut segments = Vec::new();
        let mut text_start = 0;
        let mut pos = 0;

        while pos < source.len() {
            let line_end = source[pos..]
                .find('\n')
                .map_or(source.len(), |offset| pos + offset);

            if let Some((lang, body, end)) = fenced_block_at(source, pos, line_end) {
                push_text(&mut segments, &source[text_start..pos]);
                segments.push(Segment::Code { lang, body });
                pos = end;
                text_start = end;
                continue;
            }

            if let Some(len) = markup_block_len(&source[pos..]) {
                push_text(&mut segments, &source[text_start..pos]);
                segments.push(Segment::Markup(&source[pos..pos + len]));
                pos += len;
                text_start = pos;
                continue;
            }

            pos = line_end + 1;
        }

        if text_start < source.len() {
            push_text(&mut segments, &source[text_start..]);
        }

        Protected { segments }
    }

    /// Segments in document order.
    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }

    /// Number of extracted code blocks.
    pub fn code_blocks(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Code { .. }))
            .count()
    }

    /// Number of extracted raw markup blocks.
    pub fn markup_blocks(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Markup(_)))
            .count()
    }

    /// Reassemble the document, passing text segments through `render_text`
    /// and rendering protected segments in place.
    pub fn restore<F>(&self, class: &str, mut render_text: F) -> String
    where
        F: FnMut(&str) -> String,
    {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(&render_text(text)),
                Segment::Code { lang, body } => {
                    out.push_str(&render_code_block(lang.as_deref(), body, class));
                    out.push('\n');
                }
                Segment::Markup(raw) => out.push_str(raw),
            }
        }
        out
    }
}

/// Render a code block as an escaped `<pre><code>` element.
pub fn render_code_block(lang: Option<&str>, body: &str, class: &str) -> String {
    let class_attr = class_attr(class);
    let lang_attr = lang
        .map(|lang| format!(" data-lang=\"{}\"", escape_html(lang)))
        .unwrap_or_default();
    format!(
        "<pre{class_attr}><code{class_attr}{lang_attr}>{}</code></pre>",
        escape_html(body)
    )
}

/// Build a ` class="..."` attribute, or nothing for an empty class.
pub fn class_attr(class: &str) -> String {
    if class.is_empty() {
        String::new()
    } else {
        format!(" class=\"{}\"", escape_html(class))
    }
}

fn push_text<'a>(segments: &mut Vec<Segment<'a>>, text: &'a str) {
    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }
}

/// Try to read a fenced code block whose opening fence is the line at `start`.
///
/// Returns the language tag, the body, and the byte offset just past the
/// closing fence line.
fn fenced_block_at(
    source: &str,
    start: usize,
    line_end: usize,
) -> Option<(Option<String>, String, usize)> {
    let opening = source[start..line_end].trim_start();
    let info = opening.strip_prefix("```")?;
    if info.contains('`') {
        return None;
    }
    let lang = info
        .split_whitespace()
        .next()
        .filter(|word| {
            word.chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '+' | '#' | '-' | '_' | '.'))
        })
        .map(str::to_string);

    let body_start = (line_end + 1).min(source.len());
    let mut pos = body_start;
    while pos < source.len() {
        let close_end = source[pos..]
            .find('\n')
            .map_or(source.len(), |offset| pos + offset);
        let candidate = source[pos..close_end].trim();
        if candidate.len() >= 3 && candidate.chars().all(|c| c == '`') {
            let body = source[body_start..pos]
                .strip_suffix('\n')
                .unwrap_or(&source[body_start..pos]);
            let end = (close_end + 1).min(source.len());
            return Some((lang, body.to_string(), end));
        }
        pos = close_end + 1;
    }

    None
}

/// Length of a raw markup block starting at the beginning of `rest`, if any.
fn markup_block_len(rest: &str) -> Option<usize> {
    if rest.starts_with("<!--") {
        return rest.find("-->").map(|end| end + 3);
    }

    let bytes = rest.as_bytes();
    if bytes.first() != Some(&b'<') {
        return None;
    }
    let name_len = bytes[1..]
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric())
        .count();
    if name_len == 0 || !bytes[1].is_ascii_alphabetic() {
        return None;
    }
    match bytes.get(1 + name_len) {
        Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => {}
        _ => return None,
    }
    let name = rest[1..1 + name_len].to_ascii_lowercase();
    if !BLOCK_TAGS.contains(&name.as_str()) {
        return None;
    }

    let close = find_closing_tag(rest, &name)?;
    rest[close..].find('>').map(|gt| close + gt + 1)
}

/// Byte offset of the first `</name` closing tag in `haystack`.
fn find_closing_tag(haystack: &str, name: &str) -> Option<usize> {
    let bytes = haystack.as_bytes();
    haystack.match_indices("</").map(|(idx, _)| idx).find(|&idx| {
        let name_start = idx + 2;
        let name_end = name_start + name.len();
        name_end <= bytes.len()
            && bytes[name_start..name_end].eq_ignore_ascii_case(name.as_bytes())
            && bytes
                .get(name_end)
                .is_some_and(|b| *b == b'>' || b.is_ascii_whitespace())
    })
}
