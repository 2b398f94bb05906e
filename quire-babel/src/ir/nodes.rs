//! Block and inline nodes of a parsed Markdown document

/// A parsed Markdown document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
    pub footnotes: Vec<Footnote>,
}

/// Block-level elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A single text line; rendered as a paragraph unless it opens with markup
    Line(Vec<Inline>),
    /// Blank source line, kept so blank-line runs render like the source
    Blank,
    Heading {
        level: u8,
        content: Vec<Inline>,
    },
    Rule,
    Table(Table),
    Quote(Vec<Block>),
    List(List),
    /// Fenced code block from the protected segments
    Code {
        lang: Option<String>,
        body: String,
    },
    /// Raw markup from the protected segments
    Markup(String),
}

/// A GFM table. Rows keep whatever cell count the source had.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<Vec<Inline>>,
    pub rows: Vec<Vec<Vec<Inline>>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// `Some(checked)` for task-list items
    pub task: Option<bool>,
    pub content: Vec<Inline>,
}

/// Footnote definition. Identifiers are unique; a later definition replaces
/// the body of an earlier one in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footnote {
    pub id: String,
    pub content: Vec<Inline>,
}

/// Inline elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// Text passed through as-is (inline HTML is allowed)
    Text(String),
    /// Code span; its text is escaped on render
    Code(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Strike(Vec<Inline>),
    Superscript(String),
    Subscript(String),
    Link {
        content: Vec<Inline>,
        href: String,
        title: Option<String>,
    },
    Image {
        alt: String,
        src: String,
        title: Option<String>,
    },
    FootnoteRef(String),
}
