//! Fence recognition for diagram code blocks.
//!
//! Only backtick fences tagged `mermaid` (or its synonym `mmd`) open a
//! diagram block. Any line consisting of a bare triple backtick closes it.

use std::sync::LazyLock;

use regex::Regex;

/// Opening fence: three backticks, a diagram tag, and an optional trailing title.
static FENCE_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*```\s*(?:mermaid|mmd)(?:\s+(.*?))?\s*$").unwrap());

/// Closing fence: three backticks with nothing but whitespace around them.
static FENCE_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*```\s*$").unwrap());

/// An opening fence line of a diagram block.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct FenceOpen<'a> {
    /// Title written after the tag, if any.
    pub title: Option<&'a str>,
}

/// Parse a line as an opening diagram fence.
///
/// Returns `None` when the line is not a diagram fence. A blank title is
/// reported as absent.
pub(crate) fn parse_open(line: &str) -> Option<FenceOpen<'_>> {
    let caps = FENCE_OPEN_RE.captures(line)?;
    let title = caps
        .get(1)
        .map(|m| m.as_str().trim())
        .filter(|t| !t.is_empty());
    Some(FenceOpen { title })
}

/// Check whether a line closes a diagram block.
pub(crate) fn is_close(line: &str) -> bool {
    FENCE_CLOSE_RE.is_match(line)
}

/// Check whether a line starts any backtick fence, tagged or not.
pub(crate) fn is_fence_marker(line: &str) -> bool {
    line.trim_start().starts_with("```")
}
