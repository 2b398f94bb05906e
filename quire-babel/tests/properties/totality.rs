//! Every converter is total over arbitrary text.

use crate::common::mappings;
use proptest::prelude::*;
use quire_babel::{
    html_to_markdown, html_to_plain_text, markdown_to_html, plain_text_to_html,
    plain_text_to_markdown, MarkdownOptions, PlainHtmlOptions,
};

/// Strings dense in the characters the converters react to.
fn markupish() -> impl Strategy<Value = String> {
    proptest::string::string_regex(r"[a-z0-9 <>/\[\]()*_`~^#|>!:.\t\n=&;-]{0,200}").unwrap()
}

proptest! {
    #[test]
    fn markdown_to_html_is_total(input in any::<String>()) {
        let _ = markdown_to_html(&input, &MarkdownOptions::default());
        let _ = markdown_to_html(&input, &MarkdownOptions::default().escaped());
    }

    #[test]
    fn markdown_never_leaves_placeholders(input in markupish()) {
        prop_assume!(!input.contains("[[["));
        let html = markdown_to_html(&input, &MarkdownOptions::default());
        prop_assert!(!html.contains("[[["));
    }

    #[test]
    fn html_converters_are_total(input in any::<String>()) {
        let _ = html_to_markdown(&input, &mappings());
        let _ = html_to_plain_text(&input);
    }

    #[test]
    fn html_converters_handle_tag_soup(input in markupish()) {
        let _ = html_to_markdown(&input, &mappings());
        let text = html_to_plain_text(&input);
        prop_assert_eq!(text.trim(), text.as_str());
    }

    #[test]
    fn plain_converters_are_total(input in any::<String>()) {
        let _ = plain_text_to_markdown(&input);
        let _ = plain_text_to_html(&input, &PlainHtmlOptions::default());
        let _ = plain_text_to_html(&input, &PlainHtmlOptions::default().minified());
    }

    #[test]
    fn whitespace_only_input_is_empty_output(input in "[ \t\r\n]{0,20}") {
        prop_assert_eq!(markdown_to_html(&input, &MarkdownOptions::default()), "");
        prop_assert_eq!(html_to_markdown(&input, &[]), "");
        prop_assert_eq!(html_to_plain_text(&input), "");
        prop_assert_eq!(plain_text_to_markdown(&input), "");
        prop_assert_eq!(plain_text_to_html(&input, &PlainHtmlOptions::default()), "");
    }
}
