//! Conversion between Markdown, HTML and plain text
//!
//!     This crate converts text between three markups: Markdown → HTML, HTML → Markdown,
//!     HTML → plain text, plain text → Markdown and plain text → HTML. Every conversion is total:
//!     any UTF-8 input gives some output, malformed structure degrades to literal text.
//!
//!     This is a pure lib, that is, it powers quire-cli but is shell agnostic: no code here
//!     prints, reads env vars, or touches files. Reading and writing is left to callers, or to
//!     the stream adapter over any reader and writer.
//!
//!     The file structure:
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Markup identities and the Converter trait
//!     ├── registry.rs             # ConverterRegistry keyed by (source, target)
//!     ├── stream.rs               # Buffering reader → writer adapter
//!     ├── formats
//!     │   ├── markdown            # Markdown → HTML: block + inline tokenizers, renderer
//!     │   ├── html                # HTML → Markdown DOM walk + tag rules, HTML → text scanner
//!     │   └── plain               # text → Markdown heuristics, text → HTML formatter
//!     ├── ir                      # Typed Markdown tree
//!     └── common                  # Escaping, protected blocks, tab tables, line utilities
//!
//! Testing
//!     tests
//!     └── <area>
//!         └── <testname>.rs
//!
//!     Rust does not discover tests in subdirectories, tests/lib.rs includes them.
//!
//! Core Algorithms
//!
//!     Markdown → HTML never rewrites a flat buffer pass after pass. Fenced code and raw
//!     markup blocks are cut out into an ordered segment list first, so nothing in the input
//!     can collide with them. The rest is tokenized into a typed tree (./ir/nodes.rs): a
//!     line-based block tokenizer with an explicit, depth-bounded stack for blockquotes, and an
//!     inline tokenizer whose rule order is the precedence (images before links, bold before
//!     italic). The tree is rendered once.
//!
//!     HTML → Markdown parses the input once with html5ever (./formats/html/dom.rs) and renders
//!     the tree bottom-up. Each element goes to the first tag rule (./formats/html/rules.rs)
//!     that handles it: generic rules built from caller mapping records, then built-in rules in
//!     a fixed order. Each rule can be listed and run on a single element.
//!
//!     HTML → plain text is a single forward scan with a small state record.
//!
//! Converters
//!
//!     Each direction implements the Converter trait (./format.rs) and is registered in the
//!     ConverterRegistry. The free functions below call the same code with explicit options.
//!
pub mod error;
pub mod format;
pub mod formats;
pub mod registry;
pub mod stream;

pub mod common;
pub mod ir;

pub use error::FormatError;
pub use format::{Converter, Markup};
pub use formats::{
    html_to_markdown, html_to_plain_text, markdown_to_html, plain_text_to_html,
    plain_text_to_markdown, HtmlToMarkdown, HtmlToPlainText, Locale, MarkdownOptions,
    MarkdownToHtml, PlainHtmlOptions, PlainTextToHtml, PlainTextToMarkdown, TagMapping,
};
pub use registry::ConverterRegistry;
pub use stream::StreamAdapter;
