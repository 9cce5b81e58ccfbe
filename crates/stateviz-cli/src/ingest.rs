//! Parsing of JSON-lines logs into an [`EventLog`].
//!
//! Each non-blank line is one entry record. Parsing is forgiving at the line
//! level and strict at the mutation level:
//!
//! 1. Blank lines are skipped and exact duplicate lines are collapsed.
//!    Lines differing only in surrounding whitespace are distinct.
//! 2. A line is tried as strict JSON, then as JSON5 (unquoted keys, single
//!    quotes, trailing commas). A line that fails both is dropped with a
//!    warning.
//! 3. Every surviving record goes through [`EventLog::build`], so a bad
//!    mutation field fails the whole load with `MalformedMutation`.

use std::collections::BTreeSet;

use stateviz_log::{EventLog, RawEntry};
use tracing::{debug, warn};

use crate::error::CliError;

/// Records recovered from a text log.
#[derive(Debug, Default)]
pub struct ParsedLines {
    /// Entry records in input order.
    pub entries: Vec<RawEntry>,
    /// Lines that could not be parsed.
    pub dropped: usize,
    /// Repeated lines that were collapsed.
    pub duplicates: usize,
}

/// Parse a JSON-lines log and build it.
///
/// # Errors
///
/// Returns [`CliError::Log`] if any record carries a malformed mutation.
pub fn load_log(text: &str) -> Result<EventLog, CliError> {
    let parsed = parse_lines(text);
    debug!(
        entries = parsed.entries.len(),
        dropped = parsed.dropped,
        duplicates = parsed.duplicates,
        "log lines parsed"
    );
    Ok(EventLog::build(parsed.entries)?)
}

/// Split `text` into entry records.
pub fn parse_lines(text: &str) -> ParsedLines {
    let mut seen = BTreeSet::new();
    let mut parsed = ParsedLines::default();

    for (line_no, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !seen.insert(line) {
            parsed.duplicates = parsed.duplicates.saturating_add(1);
            continue;
        }
        match parse_line(trimmed) {
            Some(entry) => parsed.entries.push(entry),
            None => {
                warn!(
                    line = line_no.saturating_add(1),
                    content = trimmed,
                    "unparseable log line dropped"
                );
                parsed.dropped = parsed.dropped.saturating_add(1);
            }
        }
    }

    parsed
}

/// Try each parse strategy in turn.
fn parse_line(line: &str) -> Option<RawEntry> {
    // Strategy 1: strict JSON
    if let Ok(entry) = serde_json::from_str::<RawEntry>(line) {
        return Some(entry);
    }

    // Strategy 2: JSON5, for hand-written object literals
    json5::from_str::<RawEntry>(line).ok()
}
