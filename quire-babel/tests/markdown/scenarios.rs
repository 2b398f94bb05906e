//! The literal Markdown → HTML scenarios.

use crate::common::md;
use quire_babel::{markdown_to_html, MarkdownOptions};

#[test]
fn escape_mode_renders_source_literally() {
    let html = markdown_to_html("**not bold**", &MarkdownOptions::default().escaped());
    assert!(html.contains(r"\*\*"));
    assert!(!html.contains("<strong>"));
}

#[test]
fn fenced_code_with_language() {
    assert_eq!(
        md("```csharp\nvar a = 5;\n```"),
        r#"<pre><code data-lang="csharp">var a = 5;</code></pre>"#
    );
}

#[test]
fn bold_runs_before_italic() {
    assert_eq!(
        md("**bold** and *italic*"),
        "<strong>bold</strong> and <em>italic</em>"
    );
}

#[test]
fn bold_and_italic_span_claimed_inlines() {
    assert_eq!(
        md("**use `foo` now**"),
        "<strong>use <code>foo</code> now</strong>"
    );
    assert_eq!(
        md("**see [docs](http://x)**"),
        r#"<strong>see <a href="http://x">docs</a></strong>"#
    );
    assert_eq!(
        md("_call `f()` first_"),
        "<em>call <code>f()</code> first</em>"
    );
    assert!(md("*note[^1]*\n\n[^1]: n").starts_with(
        r##"<em>note<sup><a href="#fn-1" id="fnref-1">1</a></sup></em>"##
    ));
}

#[test]
fn gfm_table_keeps_row_order() {
    let html = md("| Name | Age |\n|------|-----|\n| Ann | 31 |\n| Bob | 42 |\n| Cy | 7 |");
    assert_eq!(html.matches("<th>").count(), 2);
    assert_eq!(html.matches("<td>").count(), 6);
    assert_eq!(html.matches("<thead>").count(), 1);
    let ann = html.find("Ann").unwrap();
    let bob = html.find("Bob").unwrap();
    let cy = html.find("Cy").unwrap();
    assert!(ann < bob && bob < cy);
    assert_eq!(
        html,
        "<table>\n<thead>\n<tr><th>Name</th><th>Age</th></tr>\n</thead>\n<tbody>\n\
         <tr><td>Ann</td><td>31</td></tr>\n<tr><td>Bob</td><td>42</td></tr>\n\
         <tr><td>Cy</td><td>7</td></tr>\n</tbody>\n</table>"
    );
}

#[test]
fn ordered_list_is_renumbered_by_position() {
    let expected = "<ol>\n<li>First</li>\n<li>Second</li>\n<li>Third</li>\n</ol>";
    assert_eq!(md("1. First\n2. Second\n3. Third"), expected);
    assert_eq!(md("3. First\n3. Second\n9. Third"), expected);
}

#[test]
fn literal_placeholder_text_survives() {
    let html = md("[[[CODEBLOCK-0]]]\n```\nx\n```\n<div>[[[MARKUP-0]]]</div>");
    assert!(html.contains("<p>[[[CODEBLOCK-0]]]</p>"));
    assert!(html.contains("<pre><code>x</code></pre>"));
    assert!(html.contains("<div>[[[MARKUP-0]]]</div>"));
    assert_eq!(html.matches("[[[").count(), 2);
}
