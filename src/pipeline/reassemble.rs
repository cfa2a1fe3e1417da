//! Document reassembler — joins translated line records into final text.

use crate::pipeline::segment::LineRecord;

/// Returned instead of an empty document so callers can tell "nothing was
/// found" apart from "found but blank".
pub const NO_TEXT_DETECTED: &str = "No text detected";

/// Reassemble translated line records into the final document string.
///
/// Per record, in order: a flagged paragraph gap emits one empty line; then
/// `prefix` and `content` are joined with a single space when both are
/// present, or emitted alone when only one is. Records with neither emit
/// nothing. Lines are joined with `\n`; an entirely empty emission yields
/// [`NO_TEXT_DETECTED`].
pub fn reassemble(records: &[LineRecord]) -> String {
    let mut lines: Vec<String> = Vec::new();

    for record in records {
        if record.preceded_by_blank_line {
            lines.push(String::new());
        }

        if !record.content.is_empty() {
            if record.prefix.is_empty() {
                lines.push(record.content.clone());
            } else {
                lines.push(format!("{} {}", record.prefix, record.content));
            }
        } else if !record.prefix.is_empty() {
            lines.push(record.prefix.clone());
        }
    }

    if lines.is_empty() {
        NO_TEXT_DETECTED.to_string()
    } else {
        lines.join("\n")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
