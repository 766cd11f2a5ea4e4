//! Title inference from headings above a diagram fence.
//!
//! The search walks upward from the line before the fence, at most
//! [`TITLE_LOOKBACK`] lines, and stops at the first non-blank line. That
//! line yields a title only if it is an ATX heading or the underline of a
//! Setext heading.

use std::sync::LazyLock;

use regex::Regex;

use crate::consts::TITLE_LOOKBACK;
use crate::fence::is_fence_marker;

/// ATX heading: 1-6 `#` characters, whitespace, text, optional closing `#` run.
static ATX_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#{1,6}\s+(.*?)(?:\s+#+)?\s*$").unwrap());

/// Setext underline: only `=` or only `-` characters.
static SETEXT_UNDERLINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:=+|-+)\s*$").unwrap());

/// Text of an ATX heading line, if the line is one.
fn atx_heading_text(line: &str) -> Option<&str> {
    let caps = ATX_HEADING_RE.captures(line)?;
    let text = caps.get(1)?.as_str().trim();
    (!text.is_empty()).then_some(text)
}

fn is_setext_underline(line: &str) -> bool {
    SETEXT_UNDERLINE_RE.is_match(line)
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Infer a title for the fence opened at `fence_line`.
///
/// Scans `lines[fence_line - 1]` down to `lines[fence_line - TITLE_LOOKBACK]`
/// (clamped at 0), nearest first:
/// - blank lines are skipped
/// - an ATX heading wins with its text
/// - a Setext underline wins with the text of the line directly above it,
///   provided that line is still inside the window and is not blank, a
///   code fence, or another underline
/// - anything else ends the search without a title
pub(crate) fn infer_title(lines: &[&str], fence_line: usize) -> Option<String> {
    let lower = fence_line.saturating_sub(TITLE_LOOKBACK);
    let upper = fence_line.min(lines.len());

    for i in (lower..upper).rev() {
        let line = lines[i];
        if is_blank(line) {
            continue;
        }
        if let Some(text) = atx_heading_text(line) {
            return Some(text.to_owned());
        }
        if is_setext_underline(line) && i > lower {
            let above = lines[i - 1];
            if !is_blank(above) && !is_setext_underline(above) && !is_fence_marker(above) {
                let text = atx_heading_text(above).unwrap_or_else(|| above.trim());
                return Some(text.to_owned());
            }
        }
        return None;
    }

    None
}
