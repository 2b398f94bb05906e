//! Plain text → Markdown structuring
//!
//! Each line is classified independently, first match wins:
//!
//! 1. a line containing a tab opens or continues a table;
//! 2. `CODE:` and `ENDCODE` open and close a fenced block whose lines pass
//!    through untouched;
//! 3. `- `, `* `, `• ` bullets become `- ` items;
//! 4. `1. ` style lines pass through;
//! 5. an all-caps line of letters, digits and spaces longer than three
//!    characters becomes a `#` heading in sentence case;
//! 6. `> ` quotes pass through;
//! 7. anything else passes through verbatim.
//!
//! A table ends at the first line without a tab. When that line is not blank
//! a blank line is inserted so the Markdown table terminates.

use crate::common::tabular::{is_table_line, TabTable};
use crate::common::text::normalize_newlines;
use crate::format::{Converter, Markup};
use once_cell::sync::Lazy;
use regex::Regex;

static ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s").unwrap());

const CODE_OPEN: &str = "CODE:";
const CODE_CLOSE: &str = "ENDCODE";

/// Give plain text a Markdown structure.
pub fn plain_text_to_markdown(text: &str) -> String {
    let text = normalize_newlines(text);
    if text.trim().is_empty() {
        return String::new();
    }

    let mut out: Vec<String> = Vec::new();
    let mut table: Option<TabTable> = None;
    let mut in_code = false;

    for line in text.lines() {
        if in_code {
            if line.trim() == CODE_CLOSE {
                out.push("```".to_string());
                in_code = false;
            } else {
                out.push(line.to_string());
            }
            continue;
        }

        if is_table_line(line) {
            match table.as_ref().map(|open| open.row(line)) {
                Some(cells) => out.push(pipe_row(&cells)),
                None => {
                    let (open, header) = TabTable::open(line);
                    out.push(pipe_row(&header));
                    out.push(pipe_row(&vec!["---".to_string(); open.columns()]));
                    table = Some(open);
                }
            }
            continue;
        }
        if table.take().is_some() && !line.trim().is_empty() {
            out.push(String::new());
        }

        out.push(classify(line, &mut in_code));
    }

    if in_code {
        log::debug!("text-to-markdown: closing unterminated CODE: block");
        out.push("```".to_string());
    }

    out.join("\n").trim_matches('\n').to_string()
}

fn classify(line: &str, in_code: &mut bool) -> String {
    let trimmed = line.trim();
    if trimmed == CODE_OPEN {
        *in_code = true;
        return "```".to_string();
    }
    if trimmed == CODE_CLOSE {
        return "```".to_string();
    }

    if let Some(item) = ["- ", "* ", "• "]
        .iter()
        .find_map(|marker| line.strip_prefix(*marker))
    {
        return format!("- {item}");
    }
    if ORDERED_ITEM.is_match(line) {
        return line.to_string();
    }
    if is_heading(trimmed) {
        return format!("# {}", sentence_case(trimmed));
    }
    line.to_string()
}

fn is_heading(line: &str) -> bool {
    line.chars().count() > 3
        && line.chars().any(char::is_alphabetic)
        && line
            .chars()
            .all(|c| c.is_alphanumeric() || c.is_whitespace())
        && !line.chars().any(char::is_lowercase)
}

fn sentence_case(line: &str) -> String {
    let lower = line.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One pipe-table row. Pipes inside a cell are escaped so the column count holds.
fn pipe_row(cells: &[String]) -> String {
    let cells: Vec<String> = cells.iter().map(|cell| cell.replace('|', "\\|")).collect();
    format!("| {} |", cells.join(" | "))
}

/// Converter for plain text → Markdown
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextToMarkdown;

impl Converter for PlainTextToMarkdown {
    fn name(&self) -> &str {
        "text-to-markdown"
    }

    fn description(&self) -> &str {
        "Plain text to Markdown by line heuristics"
    }

    fn source(&self) -> Markup {
        Markup::PlainText
    }

    fn target(&self) -> Markup {
        Markup::Markdown
    }

    fn convert(&self, source: &str) -> String {
        plain_text_to_markdown(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_table_gets_header_and_separator() {
        assert_eq!(
            plain_text_to_markdown("City\tPop\nLondon\t9000000"),
            "| City | Pop |\n| --- | --- |\n| London | 9000000 |"
        );
    }

    #[test]
    fn pipes_inside_cells_are_escaped() {
        assert_eq!(
            plain_text_to_markdown("A|B\tC\n1\t2"),
            "| A\\|B | C |\n| --- | --- |\n| 1 | 2 |"
        );
    }

    #[test]
    fn short_rows_are_padded_and_table_is_terminated() {
        assert_eq!(
            plain_text_to_markdown("a\tb\tc\n1\t2\nafter"),
            "| a | b | c |\n| --- | --- | --- |\n| 1 | 2 |  |\n\nafter"
        );
    }

    #[test]
    fn bullets_and_ordered_items() {
        assert_eq!(
            plain_text_to_markdown("• one\n* two\n- three\n1. four"),
            "- one\n- two\n- three\n1. four"
        );
    }

    #[test]
    fn upper_case_lines_become_headings() {
        assert_eq!(plain_text_to_markdown("RELEASE NOTES 2"), "# Release notes 2");
        assert_eq!(plain_text_to_markdown("FAQ"), "FAQ");
        assert_eq!(plain_text_to_markdown("NOTE: X"), "NOTE: X");
        assert_eq!(plain_text_to_markdown("1234"), "1234");
    }

    #[test]
    fn code_markers_fence_verbatim_lines() {
        assert_eq!(
            plain_text_to_markdown("CODE:\nBIG LOUD LINE\n- not a bullet\nENDCODE\ntext"),
            "```\nBIG LOUD LINE\n- not a bullet\n```\ntext"
        );
        assert_eq!(plain_text_to_markdown("CODE:\nx"), "```\nx\n```");
    }

    #[test]
    fn quotes_and_other_lines_pass_through() {
        assert_eq!(
            plain_text_to_markdown("> quoted\nplain *line*"),
            "> quoted\nplain *line*"
        );
    }
}
