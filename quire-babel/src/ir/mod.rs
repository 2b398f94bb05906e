//! Intermediate representation for Markdown documents
//!
//! The Markdown→HTML direction tokenizes its input into the typed tree in
//! [`nodes`] and renders that tree once. No rewriting happens on rendered
//! output, so one rule can never re-match text produced by another.

pub mod nodes;
