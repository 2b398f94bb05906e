use crate::common::mappings;
use quire_babel::{ConverterRegistry, FormatError, HtmlToMarkdown, Markup};
use std::collections::HashMap;

#[test]
fn every_direction_but_identity_is_registered() {
    let registry = ConverterRegistry::with_defaults();
    for from in Markup::ALL {
        for to in Markup::ALL {
            let expected = !(from == to || (from == Markup::Markdown && to == Markup::PlainText));
            assert_eq!(registry.has(from, to), expected, "{from} -> {to}");
        }
    }
}

#[test]
fn missing_direction_is_an_error() {
    let registry = ConverterRegistry::with_defaults();
    assert_eq!(
        registry.convert("x", Markup::Markdown, Markup::PlainText),
        Err(FormatError::ConverterNotFound("markdown-to-text".to_string()))
    );
}

#[test]
fn registering_replaces_the_direction() {
    let mut registry = ConverterRegistry::with_defaults();
    assert_eq!(
        registry
            .convert("<em>x</em>", Markup::Html, Markup::Markdown)
            .unwrap(),
        "x"
    );
    registry.register(HtmlToMarkdown::new(mappings()));
    assert_eq!(
        registry
            .convert("<em>x</em>", Markup::Html, Markup::Markdown)
            .unwrap(),
        "*x*"
    );
    assert_eq!(registry.list_converters().len(), 5);
}

#[test]
fn options_flow_through_the_registry() {
    let registry = ConverterRegistry::with_defaults();
    let mut options = HashMap::new();
    options.insert("css-class".to_string(), "c".to_string());
    assert_eq!(
        registry
            .convert_with_options("# T", Markup::Markdown, Markup::Html, &options)
            .unwrap(),
        "<h1 class=\"c\">T</h1>"
    );
    assert!(registry
        .convert_with_options("x", Markup::Html, Markup::PlainText, &options)
        .is_err());
}

#[test]
fn markup_from_filename() {
    let registry = ConverterRegistry::default();
    assert_eq!(
        registry.detect_markup_from_filename("notes/README.md"),
        Some(Markup::Markdown)
    );
    assert_eq!(
        registry.detect_markup_from_filename("page.HTM"),
        Some(Markup::Html)
    );
    assert_eq!(registry.detect_markup_from_filename("data.bin"), None);
}
