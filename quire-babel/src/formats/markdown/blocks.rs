//! Block tokenizer
//!
//! Turns protected segments into a [`Document`]. Each source line is
//! classified in a fixed order:
//!
//! 1. footnote definition (`[^id]: body`), collected and removed
//! 2. GFM table (header line, separator line, data lines)
//! 3. horizontal rule (`---`, `***`, `___`)
//! 4. ATX heading (`#` to `######`)
//! 5. blockquote run (lines starting with `>`)
//! 6. ordered list run (`N. item`)
//! 7. unordered list run (`-`, `*`, `+`)
//! 8. blank line
//! 9. anything else is a text line
//!
//! Blockquotes are parsed with an explicit stack of frames instead of
//! recursion. A quote run opened at the maximum depth is not parsed further;
//! its lines are kept as escaped literal text.

use crate::common::escape::escape_html;
use crate::common::protect::{Protected, Segment};
use crate::formats::markdown::inlines::parse_inlines;
use crate::ir::nodes::{Block, Document, Footnote, Inline, List, ListItem, Table};
use once_cell::sync::Lazy;
use regex::Regex;

static FOOTNOTE_DEF: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[\^([^\]\s]+)\]:\s*(.*)$").unwrap());
static TABLE_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\|?\s*:?-+:?\s*(?:\|\s*:?-+:?\s*)*\|?\s*$").unwrap()
});
static RULE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s{0,3}(?:-{3,}|\*{3,}|_{3,})\s*$").unwrap());
static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.+?)\s*$").unwrap());
static ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+\.\s+(.*)$").unwrap());
static UNORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[-*+]\s+(.*)$").unwrap());
static TASK_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[([ xX])\]\s+(.*)$").unwrap());

/// Unit of work inside a frame: a text line or a protected block.
#[derive(Debug, Clone)]
enum Item {
    Line(String),
    Code { lang: Option<String>, body: String },
    Markup(String),
}

/// One level of blockquote nesting being parsed.
struct Frame {
    items: Vec<Item>,
    pos: usize,
    blocks: Vec<Block>,
    depth: usize,
}

impl Frame {
    fn new(items: Vec<Item>, depth: usize) -> Self {
        Frame {
            items,
            pos: 0,
            blocks: Vec::new(),
            depth,
        }
    }

    fn line(&self, index: usize) -> Option<&str> {
        match self.items.get(index) {
            Some(Item::Line(line)) => Some(line),
            _ => None,
        }
    }
}

/// Parse Markdown source into a block tree.
///
/// `max_quote_depth` bounds blockquote nesting; `0` renders every quote
/// literally.
pub fn parse_document(source: &str, max_quote_depth: usize) -> Document {
    let mut footnotes = Vec::new();
    let mut stack = vec![Frame::new(items_from(source), 0)];

    loop {
        let Some(frame) = stack.last_mut() else {
            return Document::default();
        };

        if frame.pos >= frame.items.len() {
            let Some(done) = stack.pop() else {
                return Document::default();
            };
            match stack.last_mut() {
                Some(parent) => parent.blocks.push(Block::Quote(done.blocks)),
                None => {
                    return Document {
                        blocks: done.blocks,
                        footnotes,
                    }
                }
            }
            continue;
        }

        if let Some(inner) = step(frame, &mut footnotes, max_quote_depth) {
            let depth = frame.depth + 1;
            stack.push(Frame::new(items_from(&inner), depth));
        }
    }
}

/// Split source into frame items using protected-block extraction.
fn items_from(source: &str) -> Vec<Item> {
    let protected = Protected::extract(source);
    let mut items = Vec::new();
    let mut after_markup = false;

    for segment in protected.segments() {
        match segment {
            Segment::Text(text) => {
                let text = if after_markup {
                    text.strip_prefix('\n').unwrap_or(text)
                } else {
                    text
                };
                items.extend(text.lines().map(|line| Item::Line(line.to_string())));
                after_markup = false;
            }
            Segment::Code { lang, body } => {
                items.push(Item::Code {
                    lang: lang.clone(),
                    body: body.clone(),
                });
                after_markup = false;
            }
            Segment::Markup(raw) => {
                items.push(Item::Markup(raw.to_string()));
                after_markup = true;
            }
        }
    }

    items
}

/// Consume one construct from the frame.
///
/// Returns the inner text of a blockquote run that should be parsed as a new
/// frame; everything else is pushed onto `frame.blocks` directly.
fn step(frame: &mut Frame, footnotes: &mut Vec<Footnote>, max_depth: usize) -> Option<String> {
    let line = match &frame.items[frame.pos] {
        Item::Code { lang, body } => {
            frame.blocks.push(Block::Code {
                lang: lang.clone(),
                body: body.clone(),
            });
            frame.pos += 1;
            return None;
        }
        Item::Markup(raw) => {
            frame.blocks.push(Block::Markup(raw.clone()));
            frame.pos += 1;
            return None;
        }
        Item::Line(line) => line.clone(),
    };

    if let Some(caps) = FOOTNOTE_DEF.captures(&line) {
        define_footnote(footnotes, &caps[1], &caps[2]);
        frame.pos += 1;
        return None;
    }

    if let Some(table) = take_table(frame) {
        frame.blocks.push(Block::Table(table));
        return None;
    }

    if RULE.is_match(&line) {
        frame.blocks.push(Block::Rule);
        frame.pos += 1;
        return None;
    }

    if let Some(caps) = HEADING.captures(&line) {
        frame.blocks.push(Block::Heading {
            level: caps[1].len() as u8,
            content: parse_inlines(&caps[2]),
        });
        frame.pos += 1;
        return None;
    }

    if line.starts_with('>') {
        let run = take_run(frame, |line| line.starts_with('>'));
        if frame.depth >= max_depth {
            log::debug!(
                "blockquote nested beyond depth {max_depth}, rendering {} lines literally",
                run.len()
            );
            frame.blocks.extend(
                run.iter()
                    .map(|line| Block::Line(vec![Inline::Text(escape_html(line))])),
            );
            return None;
        }
        let inner: Vec<&str> = run.iter().map(|line| unquote(line)).collect();
        return Some(inner.join("\n"));
    }

    if ORDERED_ITEM.is_match(&line) {
        let run = take_run(frame, |line| ORDERED_ITEM.is_match(line));
        frame.blocks.push(Block::List(build_list(true, &run, &ORDERED_ITEM)));
        return None;
    }

    if UNORDERED_ITEM.is_match(&line) {
        let run = take_run(frame, |line| UNORDERED_ITEM.is_match(line));
        frame
            .blocks
            .push(Block::List(build_list(false, &run, &UNORDERED_ITEM)));
        return None;
    }

    frame.pos += 1;
    if line.trim().is_empty() {
        frame.blocks.push(Block::Blank);
    } else {
        frame.blocks.push(Block::Line(parse_inlines(line.trim())));
    }
    None
}

fn define_footnote(footnotes: &mut Vec<Footnote>, id: &str, body: &str) {
    let content = parse_inlines(body.trim());
    match footnotes.iter_mut().find(|note| note.id == id) {
        Some(existing) => existing.content = content,
        None => footnotes.push(Footnote {
            id: id.to_string(),
            content,
        }),
    }
}

/// Take the maximal run of consecutive text lines matching `pred`.
fn take_run(frame: &mut Frame, pred: impl Fn(&str) -> bool) -> Vec<String> {
    let mut run = Vec::new();
    while let Some(line) = frame.line(frame.pos) {
        if !pred(line) {
            break;
        }
        run.push(line.to_string());
        frame.pos += 1;
    }
    run
}

fn unquote(line: &str) -> &str {
    let rest = line.strip_prefix('>').unwrap_or(line);
    rest.strip_prefix(' ').unwrap_or(rest)
}

fn build_list(ordered: bool, run: &[String], marker: &Regex) -> List {
    let items = run
        .iter()
        .map(|line| {
            let text = marker
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map_or("", |m| m.as_str());
            match TASK_MARKER.captures(text) {
                Some(caps) => ListItem {
                    task: Some(&caps[1] != " "),
                    content: parse_inlines(caps[2].trim()),
                },
                None => ListItem {
                    task: None,
                    content: parse_inlines(text.trim()),
                },
            }
        })
        .collect();
    List { ordered, items }
}

/// Take a GFM table starting at the frame position, if one starts here.
///
/// Rows are kept with whatever cell count the source had.
fn take_table(frame: &mut Frame) -> Option<Table> {
    let header = frame.line(frame.pos)?;
    let separator = frame.line(frame.pos + 1)?;
    if !header.contains('|') || !separator.contains('|') || !TABLE_SEPARATOR.is_match(separator) {
        return None;
    }

    let header = split_row(header);
    frame.pos += 2;
    let body = take_run(frame, |line| line.contains('|') && !line.trim().is_empty());

    Some(Table {
        header,
        rows: body.iter().map(|line| split_row(line)).collect(),
    })
}

fn split_row(line: &str) -> Vec<Vec<Inline>> {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('|').unwrap_or(trimmed);
    trimmed
        .split('|')
        .map(|cell| parse_inlines(cell.trim()))
        .collect()
}
