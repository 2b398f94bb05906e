use quire_babel::stream::DEFAULT_CHUNK_SIZE;
use quire_babel::{Converter, ConverterRegistry, FormatError, Markup, StreamAdapter};
use std::io::Cursor;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[test]
fn stream_matches_direct_conversion() {
    let registry = ConverterRegistry::with_defaults();
    let source = "# Title\n\n- a\n- b\n".repeat(2_000);
    for (from, to) in [
        (Markup::Markdown, Markup::Html),
        (Markup::Html, Markup::PlainText),
        (Markup::PlainText, Markup::Html),
    ] {
        let converter = registry.get(from, to).unwrap();
        let mut out = Vec::new();
        StreamAdapter::new(converter)
            .run(Cursor::new(source.as_bytes()), &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), converter.convert(&source));
    }
    assert!(source.len() > DEFAULT_CHUNK_SIZE);
}

#[test]
fn empty_stream_writes_nothing() {
    let registry = ConverterRegistry::with_defaults();
    let converter = registry.get(Markup::Markdown, Markup::Html).unwrap();
    let mut out = Vec::new();
    let written = StreamAdapter::new(converter)
        .run(Cursor::new(""), &mut out)
        .unwrap();
    assert_eq!(written, 0);
    assert!(out.is_empty());
}

#[test]
fn cancelled_flag_stops_the_stream() {
    let registry = ConverterRegistry::with_defaults();
    let converter = registry.get(Markup::PlainText, Markup::Markdown).unwrap();
    let result = StreamAdapter::new(converter)
        .with_cancel_flag(Arc::new(AtomicBool::new(true)))
        .run(Cursor::new("text"), Vec::new());
    assert_eq!(result, Err(FormatError::Cancelled));
}
