use insta::assert_snapshot;
use quire_babel::{html_to_plain_text, Converter, HtmlToPlainText};

#[test]
fn anchor_becomes_text_colon_href() {
    assert_eq!(
        html_to_plain_text(r#"<a href="http://x">text</a>"#),
        "text: http://x"
    );
}

#[test]
fn nothing_before_body_is_emitted() {
    assert_eq!(
        html_to_plain_text("<p>preamble</p><body><p>kept</p></body>"),
        "kept"
    );
}

#[test]
fn head_script_and_style_are_skipped() {
    let html = "<head><title>T</title></head><body>a<script>var s = '<p>';</script>b<style>.x{}</style>c</body>";
    assert_eq!(html_to_plain_text(html), "abc");
}

#[test]
fn ordered_list_counts_from_one() {
    assert_eq!(
        html_to_plain_text("<ol><li>a</li><li>b</li></ol><ol><li>c</li></ol>"),
        "1) a\n2) b\n\n1) c"
    );
}

#[test]
fn paragraphs_and_breaks() {
    assert_eq!(
        html_to_plain_text("<p>one<br>two</p><p>three</p>"),
        "one\ntwo\n\nthree"
    );
}

#[test]
fn converter_identity() {
    let converter = HtmlToPlainText;
    assert_eq!(converter.name(), "html-to-text");
    assert_eq!(converter.convert(""), "");
}

#[test]
fn page_snapshot() {
    let html = r#"<!DOCTYPE html>
<html>
<head><title>Page</title></head>
<body>
  <h1>Release   notes</h1>
  <p>Read the <a href="https://q.io/changes">changelog</a> first.</p>
  <ul>
    <li>Faster &amp; smaller</li>
    <li>Nested:
      <ol><li>one</li><li>two</li></ol>
    </li>
  </ul>
  <!-- <p>hidden</p> -->
  <div>Bye</div>
</body>
</html>"#;
    assert_snapshot!(html_to_plain_text(html), @r"
    Release notes
    Read the changelog: https://q.io/changes first.

    - Faster & smaller
    - Nested:
      1) one
      2) two

    Bye
    ");
}
