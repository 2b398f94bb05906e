use quire_babel::{FormatError, MarkdownToHtml, PlainTextToMarkdown, StreamAdapter};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[tokio::test]
async fn async_stream_converts_once() {
    let converter = MarkdownToHtml::default();
    let mut out = Vec::new();
    let written = StreamAdapter::new(&converter)
        .with_chunk_size(2)
        .run_async(&b"*hi*"[..], &mut out)
        .await
        .unwrap();
    assert_eq!(out, b"<em>hi</em>");
    assert_eq!(written, out.len());
}

#[tokio::test]
async fn async_stream_honours_cancellation() {
    let converter = PlainTextToMarkdown;
    let mut out = Vec::new();
    let result = StreamAdapter::new(&converter)
        .with_cancel_flag(Arc::new(AtomicBool::new(true)))
        .run_async(&b"text"[..], &mut out)
        .await;
    assert_eq!(result, Err(FormatError::Cancelled));
}
