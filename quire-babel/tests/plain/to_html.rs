use quire_babel::{plain_text_to_html, Converter, Locale, PlainHtmlOptions, PlainTextToHtml};
use std::collections::HashMap;

fn neutral() -> PlainHtmlOptions {
    PlainHtmlOptions::default().with_locale(Locale::None)
}

#[test]
fn whole_input_is_one_paragraph_until_a_blank_line() {
    assert_eq!(
        plain_text_to_html("a\nb\n\nc", &neutral()),
        "<p>a<br>\nb</p>\n<p>c</p>"
    );
}

#[test]
fn list_types_switch() {
    assert_eq!(
        plain_text_to_html("- a\n1) b\n• c", &neutral()),
        "<ul>\n<li>a</li>\n</ul>\n<ol>\n<li>b</li>\n</ol>\n<ul>\n<li>c</li>\n</ul>"
    );
}

#[test]
fn indentation_becomes_nbsp() {
    assert_eq!(
        plain_text_to_html("code:\n    x = 1", &neutral()),
        "<p>code:<br>\n&nbsp;&nbsp;&nbsp;&nbsp;x = 1</p>"
    );
}

#[test]
fn escaping_happens_before_linking() {
    assert_eq!(
        plain_text_to_html("<b> see http://q.io/?a=1&b=2, ok", &neutral()),
        "<p>&lt;b&gt; see <a href=\"http://q.io/?a=1&amp;b=2\">http://q.io/?a=1&amp;b=2</a>, ok</p>"
    );
}

#[test]
fn slovak_and_czech_bind_prepositions() {
    let slovak = PlainHtmlOptions::default().with_locale(Locale::Slovak);
    assert_eq!(plain_text_to_html("ja a ty", &slovak), "<p>ja a&nbsp;ty</p>");
    assert_eq!(
        plain_text_to_html("s tebou", &PlainHtmlOptions::default()),
        "<p>s&nbsp;tebou</p>"
    );
}

#[test]
fn minified_output_has_no_newlines() {
    let html = plain_text_to_html("a\nb\n\n- x\n\nName\tAge\nAnn\t3", &neutral().minified());
    assert!(!html.contains('\n'));
    assert_eq!(
        html,
        "<p>a<br>b</p><ul><li>x</li></ul><table><tr><th>Name</th><th>Age</th></tr><tr><td>Ann</td><td>3</td></tr></table>"
    );
}

#[test]
fn converter_rejects_unknown_options() {
    let mut options = HashMap::new();
    options.insert("css-class".to_string(), "x".to_string());
    assert!(PlainTextToHtml::default()
        .convert_with_options("a", &options)
        .is_err());
}
