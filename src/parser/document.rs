//! Block splitting and property tokenizing.
//!
//! A `.vents` file is a flat list of lines. `====<id>====` marker lines open a
//! block, every other non-blank line is a `key value` pair for the block that
//! is currently open. Lines before the first marker belong to block 0.

use serde::{Deserialize, Serialize};

use super::types::ParsedDocument;
use super::value::coerce_value;

/// What to do when a marker names a block id that was already opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatedMarker {
    /// Keep the earlier properties; later lines overwrite key by key.
    #[default]
    Merge,

    /// Drop the earlier properties and start the block again in place.
    Reset,
}

/// Options for [`parse_document_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub repeated_markers: RepeatedMarker,
}

impl ParseOptions {
    pub fn with_repeated_markers(mut self, policy: RepeatedMarker) -> Self {
        self.repeated_markers = policy;
        self
    }
}

/// Parse `.vents` text into blocks of typed properties.
///
/// Never fails: blank lines and lines without a value are skipped.
pub fn parse_document(source: &str) -> ParsedDocument {
    parse_document_with(source, &ParseOptions::default())
}

/// Parse `.vents` text with explicit options.
pub fn parse_document_with(source: &str, options: &ParseOptions) -> ParsedDocument {
    let mut doc = ParsedDocument::new();
    let mut current_id = 0;
    let mut skipped = 0usize;

    for (i, line) in split_lines(source).enumerate() {
        let line_number = i + 1;

        if let Some(id) = parse_marker(line) {
            let revisit = doc.get(id).is_some();
            let block = doc.entry(id, line_number);
            if revisit && options.repeated_markers == RepeatedMarker::Reset {
                block.clear();
            }
            current_id = id;
            continue;
        }

        if line.trim().is_empty() {
            continue;
        }

        let Some((key, value)) = split_property(line) else {
            tracing::trace!(line = line_number, "skipping line without a value");
            skipped += 1;
            continue;
        };

        // Lines before any marker open block 0 on demand.
        doc.entry(current_id, 0).insert(key, coerce_value(value));
    }

    tracing::debug!(blocks = doc.len(), skipped, "parsed vents document");

    doc
}

/// Split on every line boundary a dump may use: `\n`, `\r\n`, a bare `\r`,
/// and the rarer vertical tab, form feed, separator and Unicode breaks.
fn split_lines(source: &str) -> impl Iterator<Item = &str> {
    let mut rest = source;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.char_indices().find(|&(_, c)| is_line_break(c)) {
            Some((i, c)) => {
                let line = &rest[..i];
                let mut next = i + c.len_utf8();
                if c == '\r' && rest[next..].starts_with('\n') {
                    next += 1;
                }
                rest = &rest[next..];
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

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Match `====<digits>====` exactly, returning the id.
fn parse_marker(line: &str) -> Option<u64> {
    let digits = line.strip_prefix("====")?.strip_suffix("====")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Split a line into key and value on the first run of whitespace.
fn split_property(line: &str) -> Option<(&str, &str)> {
    let (key, rest) = line.trim_start().split_once(char::is_whitespace)?;
    let value = rest.trim();
    if value.is_empty() {
        None
    } else {
        Some((key, value))
    }
}
