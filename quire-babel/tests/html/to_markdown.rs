use crate::common::mappings;
use insta::assert_snapshot;
use quire_babel::formats::html::{Element, TagMapping, TagRuleSet};
use quire_babel::{html_to_markdown, Converter, HtmlToMarkdown};

#[test]
fn unknown_tags_are_dropped_not_rejected() {
    assert_eq!(
        html_to_markdown("<custom-widget>inner <x>text</x></custom-widget>", &mappings()),
        "inner text"
    );
}

#[test]
fn ordered_list_numbers_are_regenerated() {
    let md = html_to_markdown("<ol><li>a</li><li>b</li><li>c</li></ol>", &mappings());
    assert_eq!(md, "1. a\n2. b\n3. c");
}

#[test]
fn table_rows_get_pipes_without_separator() {
    let md = html_to_markdown(
        "<table><thead><tr><th>City</th><th>Pop</th></tr></thead>\
         <tbody><tr><td>London</td><td>9000000</td></tr></tbody></table>",
        &mappings(),
    );
    assert_eq!(md, "| City | Pop |\n| London | 9000000 |");
    assert!(!md.contains("---"));
}

#[test]
fn special_mappings_are_left_to_builtin_rules() {
    let only_special = vec![TagMapping {
        markdown_token: "IGNORED".to_string(),
        ..TagMapping::special("blockquote")
    }];
    assert_eq!(
        html_to_markdown("<blockquote>q</blockquote>", &only_special),
        "> q"
    );
}

#[test]
fn generic_mappings_run_in_list_order() {
    let first = vec![TagMapping::wrap("b", "__"), TagMapping::wrap("strong", "**")];
    assert_eq!(html_to_markdown("<b>x</b>", &first), "__x__");
    assert_eq!(html_to_markdown("<b>x</b>", &[]), "**x**");
}

#[test]
fn rules_can_run_in_isolation() {
    let rules = TagRuleSet::new(&mappings());
    let links = rules.rule("links").unwrap();
    let anchor = Element::new("a").with_attr("href", "/x").with_text(" x ");
    assert_eq!(links.render(&anchor), "[x](/x)");
}

#[test]
fn large_inputs_reduce_in_linear_passes() {
    let html = "<li><b>x</b> <em>y</em></li>".repeat(10_000);
    let md = html_to_markdown(&format!("<ul>{html}</ul>"), &mappings());
    assert_eq!(md.lines().count(), 10_000);
    assert!(md.lines().all(|line| line == "- **x** *y*"));
}

#[test]
fn misnested_tags_are_repaired_by_the_parser() {
    assert_eq!(
        html_to_markdown("<p><strong>a <em>b</strong> c</em></p>", &mappings()),
        "**a *b**** c*"
    );
}

#[test]
fn converter_uses_its_mappings() {
    let converter = HtmlToMarkdown::new(mappings());
    assert_eq!(converter.convert("<p><em>hi</em></p>"), "*hi*");
    assert_eq!(converter.rules().names().first().copied(), Some("mapping:strong"));
}

#[test]
fn article_snapshot() {
    let html = r#"<html><head><title>ignored</title><style>p { color: red }</style></head>
<body>
<h1>Notes &amp; links</h1>
<p>See <a href="https://q.io">the site</a> and <strong>read</strong> it.</p>
<blockquote>Quoted<br>twice</blockquote>
<pre><code class="language-sh">echo &lt;hi&gt;</code></pre>
<ul><li>one</li><li>two <code>x</code></li></ul>
<script>alert(1)</script>
</body></html>"#;
    assert_snapshot!(html_to_markdown(html, &mappings()), @r"
    # Notes & links

    See [the site](https://q.io) and **read** it.

    > Quoted
    > twice

    ```sh
    echo <hi>
    ```

    - one
    - two `x`
    ");
}
