//! Whole-document renderings pinned with inline snapshots.

use crate::common::md;
use insta::assert_snapshot;

#[test]
fn guide_document() {
    let source = "# Guide\n\nIntro with `code` and a [link](http://x.io).\n\n- one\n- two\n\n---\n";
    assert_snapshot!(md(source), @r#"
    <h1>Guide</h1>

    <p>Intro with <code>code</code> and a <a href="http://x.io">link</a>.</p>

    <ul>
    <li>one</li>
    <li>two</li>
    </ul>

    <hr>
    "#);
}

#[test]
fn quote_with_code_and_footnote() {
    let source = "> Quoted *text*[^a]\n\n```rust\nfn main() {}\n```\n\n[^a]: Source";
    assert_snapshot!(md(source), @r##"
    <blockquote>
    <p>Quoted <em>text</em><sup><a href="#fn-a" id="fnref-a">a</a></sup></p>
    </blockquote>

    <pre><code data-lang="rust">fn main() {}</code></pre>

    <section id="footnotes">
    <ol>
    <li id="fn-a">Source <a href="#fnref-a">&#8617;</a></li>
    </ol>
    </section>
    "##);
}
