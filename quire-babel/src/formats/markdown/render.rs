//! HTML rendering of the Markdown tree

use crate::common::escape::escape_html;
use crate::common::protect::{class_attr, render_code_block};
use crate::common::text::finish;
use crate::ir::nodes::{Block, Document, Footnote, Inline, List, Table};
use std::cell::RefCell;
use std::collections::HashMap;

/// Renders a [`Document`] to HTML, putting the same class on every element.
///
/// The first reference to a footnote gets `id="fnref-{id}"`, which is where
/// the back-link points. Later references to the same footnote are numbered
/// `fnref-{id}-2`, `fnref-{id}-3`, ... so ids stay unique.
pub struct HtmlRenderer<'a> {
    class: &'a str,
    attr: String,
    seen_refs: RefCell<HashMap<String, usize>>,
}

impl<'a> HtmlRenderer<'a> {
    pub fn new(class: &'a str) -> Self {
        HtmlRenderer {
            class,
            attr: class_attr(class),
            seen_refs: RefCell::new(HashMap::new()),
        }
    }

    pub fn render_document(&self, doc: &Document) -> String {
        self.seen_refs.borrow_mut().clear();
        let mut out = self.render_blocks(&doc.blocks);
        if !doc.footnotes.is_empty() {
            out.push_str("\n\n");
            out.push_str(&self.render_footnotes(&doc.footnotes));
        }
        finish(&out)
    }

    fn render_blocks(&self, blocks: &[Block]) -> String {
        blocks
            .iter()
            .map(|block| self.render_block(block))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_block(&self, block: &Block) -> String {
        let c = &self.attr;
        match block {
            Block::Line(content) => {
                let html = self.render_inlines(content);
                // Lines that already open with markup are left unwrapped.
                if html.starts_with('<') {
                    html
                } else {
                    format!("<p{c}>{html}</p>")
                }
            }
            Block::Blank => String::new(),
            Block::Heading { level, content } => {
                format!("<h{level}{c}>{}</h{level}>", self.render_inlines(content))
            }
            Block::Rule => format!("<hr{c}>"),
            Block::Table(table) => self.render_table(table),
            Block::Quote(inner) => {
                let inner = finish(&self.render_blocks(inner));
                if inner.is_empty() {
                    format!("<blockquote{c}></blockquote>")
                } else {
                    format!("<blockquote{c}>\n{inner}\n</blockquote>")
                }
            }
            Block::List(list) => self.render_list(list),
            Block::Code { lang, body } => render_code_block(lang.as_deref(), body, self.class),
            Block::Markup(raw) => raw.clone(),
        }
    }

    fn render_table(&self, table: &Table) -> String {
        let c = &self.attr;
        let mut out = format!("<table{c}>\n<thead{c}>\n<tr{c}>");
        for cell in &table.header {
            out.push_str(&format!("<th{c}>{}</th>", self.render_inlines(cell)));
        }
        out.push_str("</tr>\n</thead>\n");
        if !table.rows.is_empty() {
            out.push_str(&format!("<tbody{c}>\n"));
            for row in &table.rows {
                out.push_str(&format!("<tr{c}>"));
                for cell in row {
                    out.push_str(&format!("<td{c}>{}</td>", self.render_inlines(cell)));
                }
                out.push_str("</tr>\n");
            }
            out.push_str("</tbody>\n");
        }
        out.push_str("</table>");
        out
    }

    fn render_list(&self, list: &List) -> String {
        let c = &self.attr;
        let tag = if list.ordered { "ol" } else { "ul" };
        let mut out = format!("<{tag}{c}>\n");
        for item in &list.items {
            let checkbox = match item.task {
                Some(true) => "<input type=\"checkbox\" checked disabled> ",
                Some(false) => "<input type=\"checkbox\" disabled> ",
                None => "",
            };
            out.push_str(&format!(
                "<li{c}>{checkbox}{}</li>\n",
                self.render_inlines(&item.content)
            ));
        }
        out.push_str(&format!("</{tag}>"));
        out
    }

    fn render_footnotes(&self, footnotes: &[Footnote]) -> String {
        let c = &self.attr;
        let mut out = format!("<section{c} id=\"footnotes\">\n<ol{c}>\n");
        for note in footnotes {
            let id = escape_html(&note.id);
            out.push_str(&format!(
                "<li{c} id=\"fn-{id}\">{} <a{c} href=\"#fnref-{id}\">&#8617;</a></li>\n",
                self.render_inlines(&note.content)
            ));
        }
        out.push_str("</ol>\n</section>");
        out
    }

    fn ref_anchor(&self, id: &str) -> String {
        let mut seen = self.seen_refs.borrow_mut();
        let count = seen.entry(id.to_string()).or_insert(0);
        *count += 1;
        let id = escape_html(id);
        match *count {
            1 => format!("fnref-{id}"),
            n => format!("fnref-{id}-{n}"),
        }
    }

    pub fn render_inlines(&self, inlines: &[Inline]) -> String {
        let mut out = String::new();
        for inline in inlines {
            self.render_inline(inline, &mut out);
        }
        out
    }

    fn render_inline(&self, inline: &Inline, out: &mut String) {
        let c = &self.attr;
        match inline {
            Inline::Text(text) => out.push_str(text),
            Inline::Code(code) => out.push_str(&format!("<code{c}>{}</code>", escape_html(code))),
            Inline::Strong(children) => {
                out.push_str(&format!("<strong{c}>{}</strong>", self.render_inlines(children)))
            }
            Inline::Emphasis(children) => {
                out.push_str(&format!("<em{c}>{}</em>", self.render_inlines(children)))
            }
            Inline::Strike(children) => {
                out.push_str(&format!("<del{c}>{}</del>", self.render_inlines(children)))
            }
            Inline::Superscript(text) => out.push_str(&format!("<sup{c}>{text}</sup>")),
            Inline::Subscript(text) => out.push_str(&format!("<sub{c}>{text}</sub>")),
            Inline::Link {
                content,
                href,
                title,
            } => out.push_str(&format!(
                "<a{c} href=\"{}\"{}>{}</a>",
                escape_html(href),
                title_attr(title.as_deref()),
                self.render_inlines(content)
            )),
            Inline::Image { alt, src, title } => out.push_str(&format!(
                "<img{c} src=\"{}\" alt=\"{}\"{}>",
                escape_html(src),
                escape_html(alt),
                title_attr(title.as_deref())
            )),
            Inline::FootnoteRef(id) => {
                let anchor = self.ref_anchor(id);
                let id = escape_html(id);
                out.push_str(&format!(
                    "<sup{c}><a{c} href=\"#fn-{id}\" id=\"{anchor}\">{id}</a></sup>"
                ))
            }
        }
    }
}

fn title_attr(title: Option<&str>) -> String {
    title
        .map(|title| format!(" title=\"{}\"", escape_html(title)))
        .unwrap_or_default()
}
