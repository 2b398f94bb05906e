//! Typographic locale rules
//!
//! Some languages keep one-letter prepositions and conjunctions on the same
//! line as the following word. The rule is applied to already-escaped HTML
//! text by joining such a word to its successor with `&nbsp;`.

use crate::error::FormatError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which non-breaking-space rule the plain text → HTML formatter applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Czech,
    Slovak,
    None,
}

/// Czech and Slovak share the same set.
const WEST_SLAVIC: &[char] = &['a', 'i', 'k', 'o', 's', 'u', 'v', 'z'];

impl Locale {
    pub fn name(self) -> &'static str {
        match self {
            Locale::Czech => "czech",
            Locale::Slovak => "slovak",
            Locale::None => "none",
        }
    }

    pub fn from_name(name: &str) -> Result<Locale, FormatError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "czech" | "cs" | "cz" => Ok(Locale::Czech),
            "slovak" | "sk" => Ok(Locale::Slovak),
            "none" | "off" | "" => Ok(Locale::None),
            _ => Err(FormatError::InvalidOption {
                key: "locale".to_string(),
                value: name.to_string(),
            }),
        }
    }

    /// Lowercase one-letter words bound to the next word.
    pub fn prepositions(self) -> &'static [char] {
        match self {
            Locale::Czech | Locale::Slovak => WEST_SLAVIC,
            Locale::None => &[],
        }
    }

    /// Replace the space after each one-letter preposition with `&nbsp;`.
    ///
    /// A leading `(` does not hide the word; a space before another space or
    /// at the end of the text is left alone.
    pub fn bind_prepositions(self, text: &str) -> String {
        let letters = self.prepositions();
        if letters.is_empty() {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len() + 16);
        let mut tokens = text.split(' ').peekable();
        while let Some(token) = tokens.next() {
            out.push_str(token);
            let Some(next) = tokens.peek() else {
                break;
            };
            if !next.is_empty() && is_one_letter(token, letters) {
                out.push_str("&nbsp;");
            } else {
                out.push(' ');
            }
        }
        out
    }
}

fn is_one_letter(token: &str, letters: &[char]) -> bool {
    let mut chars = token.trim_start_matches('(').chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => letters.contains(&ch.to_ascii_lowercase()),
        _ => false,
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
