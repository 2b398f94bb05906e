//! DOM reduction for HTML → Markdown
//!
//! The input is parsed once with `html5ever` into an `RcDom`, then reduced
//! bottom-up: every element is handed to the first [`TagRule`] of the set
//! that handles its tag, after all of its children have been rendered. The
//! rule sees the rendered children as an [`Element`] and returns the
//! element's Markdown, which becomes one child of the parent in turn. Rule
//! output is never parsed again.
//!
//! Text nodes arrive with entities already decoded by the parser. Comments,
//! doctypes and processing instructions produce nothing. The contents of
//! `head`, `script` and `style` are never visited. Inside `pre` every element
//! renders as its inner text so the block stays verbatim.
//!
//! The walk is iterative, so nesting depth is bounded by the parser only.

use super::rules::{TagRule, TagRuleSet};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Elements whose subtree is skipped.
const OPAQUE: &[&str] = &["head", "script", "style"];

/// An element whose children have been rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name.
    pub name: String,
    /// Attributes in source order, values decoded.
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Child>,
}

/// One rendered child of an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Text(String),
    Element(Rendered),
}

/// A child element after its rule ran.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub output: String,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into().to_ascii_lowercase(),
            ..Element::default()
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Child::Text(text.into()));
        self
    }

    pub fn with_child(mut self, child: Rendered) -> Self {
        self.children.push(Child::Element(child));
        self
    }

    /// Value of one attribute, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        find_attr(&self.attrs, name)
    }

    /// The rendered children concatenated.
    pub fn inner(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            out.push_str(child.output());
        }
        out
    }

    /// Rendered child elements named `name`, in order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Rendered> + 'a {
        self.children.iter().filter_map(move |child| match child {
            Child::Element(rendered) if rendered.name == name => Some(rendered),
            _ => None,
        })
    }
}

impl Child {
    pub fn output(&self) -> &str {
        match self {
            Child::Text(text) => text,
            Child::Element(rendered) => &rendered.output,
        }
    }
}

impl Rendered {
    pub fn new(name: impl Into<String>, output: impl Into<String>) -> Self {
        Rendered {
            name: name.into(),
            attrs: Vec::new(),
            output: output.into(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        find_attr(&self.attrs, name)
    }
}

fn find_attr<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Parse `html` and reduce it to Markdown through `rules`.
pub fn reduce_dom(html: &str, rules: &TagRuleSet) -> String {
    let dom = parse_document(RcDom::default(), Default::default()).one(html);
    let mut reducer = Reducer {
        rules,
        stack: vec![Frame::new(dom.document.clone(), None)],
        pre_depth: 0,
        elements: 0,
    };
    let out = reducer.run();
    log::trace!("html-to-markdown: reduced {} elements", reducer.elements);
    out
}

struct Frame {
    node: Handle,
    element: Option<Element>,
    next_child: usize,
}

impl Frame {
    fn new(node: Handle, element: Option<Element>) -> Self {
        Frame {
            node,
            element,
            next_child: 0,
        }
    }

    fn is_opaque(&self) -> bool {
        self.element
            .as_ref()
            .map_or(false, |element| OPAQUE.contains(&element.name.as_str()))
    }

    fn push(&mut self, child: Child) {
        if let Some(element) = self.element.as_mut() {
            element.children.push(child);
        }
    }
}

struct Reducer<'r> {
    rules: &'r TagRuleSet,
    stack: Vec<Frame>,
    pre_depth: usize,
    elements: usize,
}

impl Reducer<'_> {
    fn run(&mut self) -> String {
        let mut out = String::new();
        while let Some(frame) = self.stack.last_mut() {
            let next = if frame.is_opaque() {
                None
            } else {
                frame.node.children.borrow().get(frame.next_child).cloned()
            };
            let Some(node) = next else {
                self.close(&mut out);
                continue;
            };
            frame.next_child += 1;

            match &node.data {
                NodeData::Text { contents } => {
                    let text = contents.borrow().to_string();
                    self.emit(Child::Text(text), &mut out);
                }
                NodeData::Element { name, attrs, .. } => {
                    let element = Element {
                        name: name.local.to_ascii_lowercase().to_string(),
                        attrs: attrs
                            .borrow()
                            .iter()
                            .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                            .collect(),
                        children: Vec::new(),
                    };
                    if element.name == "pre" {
                        self.pre_depth += 1;
                    }
                    self.stack.push(Frame::new(node.clone(), Some(element)));
                }
                _ => {}
            }
        }
        out
    }

    /// Finish the top frame and hand its output to the parent.
    fn close(&mut self, out: &mut String) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let Some(element) = frame.element else {
            return;
        };
        if element.name == "pre" {
            self.pre_depth = self.pre_depth.saturating_sub(1);
        }
        self.elements += 1;

        let output = if self.pre_depth > 0 {
            element.inner()
        } else {
            match self.rules.rule_for(&element.name) {
                Some(rule) => rule.render(&element),
                None => element.inner(),
            }
        };
        let rendered = Rendered {
            name: element.name,
            attrs: element.attrs,
            output,
        };
        self.emit(Child::Element(rendered), out);
    }

    fn emit(&mut self, child: Child, out: &mut String) {
        match self.stack.last_mut() {
            Some(parent) if parent.element.is_some() => parent.push(child),
            _ => out.push_str(child.output()),
        }
    }
}
