use crate::common::md;
use quire_babel::{markdown_to_html, MarkdownOptions};

#[test]
fn headings_and_rules() {
    assert_eq!(md("## Section"), "<h2>Section</h2>");
    assert_eq!(md("####### seven"), "<p>####### seven</p>");
    assert_eq!(md("a\n\n___\n\nb"), "<p>a</p>\n\n<hr>\n\n<p>b</p>");
}

#[test]
fn nested_blockquotes() {
    assert_eq!(
        md("> outer\n> > inner"),
        "<blockquote>\n<p>outer</p>\n<blockquote>\n<p>inner</p>\n</blockquote>\n</blockquote>"
    );
}

#[test]
fn blockquote_depth_is_bounded() {
    let options = MarkdownOptions {
        max_quote_depth: 2,
        ..MarkdownOptions::default()
    };
    let html = markdown_to_html("> > > > deep", &options);
    assert_eq!(html.matches("<blockquote>").count(), 2);
    assert!(html.contains("<p>&gt; &gt; deep</p>"));
}

#[test]
fn adversarial_nesting_completes() {
    let source = format!("{}x", ">".repeat(100_000));
    let html = md(&source);
    assert_eq!(html.matches("<blockquote>").count(), 16);
}

#[test]
fn task_list_checkboxes() {
    assert_eq!(
        md("- [ ] todo\n- [x] done"),
        "<ul>\n<li><input type=\"checkbox\" disabled> todo</li>\n\
         <li><input type=\"checkbox\" checked disabled> done</li>\n</ul>"
    );
}

#[test]
fn unordered_markers_mix_in_one_list() {
    assert_eq!(
        md("- a\n* b\n+ c"),
        "<ul>\n<li>a</li>\n<li>b</li>\n<li>c</li>\n</ul>"
    );
}

#[test]
fn footnotes_are_collected_and_appended() {
    let html = md("Text[^1].\n\n[^1]: Note **here**");
    assert!(html.starts_with(
        "<p>Text<sup><a href=\"#fn-1\" id=\"fnref-1\">1</a></sup>.</p>"
    ));
    assert!(html.ends_with(
        "<section id=\"footnotes\">\n<ol>\n<li id=\"fn-1\">Note <strong>here</strong> \
         <a href=\"#fnref-1\">&#8617;</a></li>\n</ol>\n</section>"
    ));
    assert!(!html.contains("[^1]:"));
}

#[test]
fn repeated_footnote_refs_get_unique_ids() {
    let html = md("One[^1] two[^1] three[^1].\n\n[^1]: Note");
    assert!(html.starts_with(
        "<p>One<sup><a href=\"#fn-1\" id=\"fnref-1\">1</a></sup> \
         two<sup><a href=\"#fn-1\" id=\"fnref-1-2\">1</a></sup> \
         three<sup><a href=\"#fn-1\" id=\"fnref-1-3\">1</a></sup>.</p>"
    ));
    assert_eq!(html.matches("id=\"fnref-1\"").count(), 1);
    assert!(html.contains("<a href=\"#fnref-1\">&#8617;</a>"));
}

#[test]
fn footnote_ref_ids_restart_per_document() {
    let first = md("a[^x]\n\n[^x]: n");
    let second = md("a[^x]\n\n[^x]: n");
    assert_eq!(first, second);
    assert!(second.contains("id=\"fnref-x\""));
}

#[test]
fn images_links_and_titles() {
    assert_eq!(
        md(r#"![Logo](logo.png "The logo") [site](https://q.io "Home")"#),
        r#"<img src="logo.png" alt="Logo" title="The logo"> <a href="https://q.io" title="Home">site</a>"#
    );
}

#[test]
fn code_spans_are_escaped_and_opaque() {
    assert_eq!(
        md("Use `<b>**x**</b>` here"),
        "<p>Use <code>&lt;b&gt;**x**&lt;/b&gt;</code> here</p>"
    );
}

#[test]
fn strike_superscript_subscript() {
    assert_eq!(
        md("~~old~~ x^2^ H~2~O"),
        "<del>old</del> x<sup>2</sup> H<sub>2</sub>O"
    );
}

#[test]
fn raw_markup_blocks_pass_through() {
    let html = md("<div class=\"note\">\n**raw**\n</div>\n\n**md**");
    assert!(html.starts_with("<div class=\"note\">\n**raw**\n</div>"));
    assert!(html.ends_with("<strong>md</strong>"));
}

#[test]
fn css_class_reaches_every_element() {
    let html = markdown_to_html(
        "> - [link](u)",
        &MarkdownOptions::default().with_css_class("doc"),
    );
    assert_eq!(
        html,
        "<blockquote class=\"doc\">\n<ul class=\"doc\">\n<li class=\"doc\"><a class=\"doc\" href=\"u\">link</a></li>\n</ul>\n</blockquote>"
    );
}

#[test]
fn crlf_input_is_normalized() {
    assert_eq!(md("# T\r\n\r\ntext"), md("# T\n\ntext"));
}

#[test]
fn blank_line_runs_collapse() {
    assert_eq!(md("a\n\n\n\n\nb"), "<p>a</p>\n\n<p>b</p>");
}
