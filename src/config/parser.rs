//! Line scanning for flat configuration files.
//!
//! # Format
//! ```text
//! # comment
//! <name> <value>
//! ```
//!
//! # Design Decisions
//! - A line is a comment only when its very first character is `#`
//! - Lines split on the single space character; runs of spaces are kept as
//!   empty tokens, so `x  5` yields name `x` and an empty value
//! - Lines with no second token are dropped without error
//! - A repeated name overwrites the earlier value but keeps its position
//! - `\n`, `\r\n` and a bare `\r` all end a line

use indexmap::IndexMap;

const COMMENT_MARKER: char = '#';
const SEPARATOR: char = ' ';

/// A name/value pair taken from one line of the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub name: String,
    pub value: String,
    /// 1-based line number of the line that supplied `value`.
    pub line: usize,
}

/// Raw entries keyed by name, in first-appearance order.
pub type RawEntries = IndexMap<String, RawEntry>;

/// Extract a name/value pair from a single line.
///
/// Returns `None` for empty lines, comments, and lines with no value token.
pub fn parse_line(line: &str, line_number: usize) -> Option<RawEntry> {
    if line.is_empty() || line.starts_with(COMMENT_MARKER) {
        return None;
    }

    let mut tokens = line.split(SEPARATOR);
    let name = strip(tokens.next()?);
    let value = strip(tokens.next()?);

    Some(RawEntry {
        name: name.to_string(),
        value: value.to_string(),
        line: line_number,
    })
}

/// Trim Unicode whitespace plus the ASCII separators `\x1c`..=`\x1f`.
fn strip(token: &str) -> &str {
    token.trim_matches(|c: char| c.is_whitespace() || ('\x1c'..='\x1f').contains(&c))
}

/// Split content into lines, treating `\r\n`, `\r` and `\n` as terminators.
fn split_lines(content: &str) -> impl Iterator<Item = &str> {
    let mut rest = content;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(['\n', '\r']) {
            Some(end) => {
                let line = &rest[..end];
                let skip = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[end + skip..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

/// Scan file content into raw entries. Last line wins for repeated names.
pub fn parse_entries(content: &str) -> RawEntries {
    let mut entries = RawEntries::new();

    for (idx, line) in split_lines(content).enumerate() {
        match parse_line(line, idx + 1) {
            Some(entry) => {
                if let Some(previous) = entries.get(&entry.name) {
                    tracing::trace!(
                        name = %entry.name,
                        previous_line = previous.line,
                        line = entry.line,
                        "Parameter redefined"
                    );
                }
                entries.insert(entry.name.clone(), entry);
            }
            None => tracing::trace!(line = idx + 1, "Skipping line"),
        }
    }

    entries
}
