//! Extracted diagram records.

/// A diagram block found in a Markdown document.
///
/// Line numbers are 0-based indexes into the document split on `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct DiagramRecord {
    /// Diagram source between the fences, trimmed. Never empty.
    pub content: String,
    /// Zero-based position among the diagrams of the document.
    pub index: usize,
    /// Explicit fence title, inferred heading text, or `"Diagram {index + 1}"`.
    pub title: String,
    /// Line of the opening fence.
    pub start_line: usize,
    /// Line of the closing fence, or the last line for an unterminated block.
    pub end_line: usize,
    /// Verbatim lines `start_line..=end_line` joined with `\n`.
    pub raw_block: String,
}

/// Result of scanning a single document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    /// Emitted diagrams in document order.
    pub diagrams: Vec<DiagramRecord>,
    /// Number of lines in the document.
    pub line_count: usize,
    /// Diagram blocks dropped because their body was blank.
    pub dropped_empty: usize,
    /// Whether the last diagram block ran to the end of the document.
    pub unterminated: bool,
}
