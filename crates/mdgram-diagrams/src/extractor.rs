//! Line scanner that turns Markdown into [`DiagramRecord`]s.
//!
//! The scan is a single pass over the document with two states: outside a
//! diagram block, or inside one with its start line, optional title and the
//! body lines collected so far.

use crate::consts::SYNTHESIZED_TITLE_PREFIX;
use crate::fence;
use crate::heading::infer_title;
use crate::record::{DiagramRecord, ExtractionSummary};

/// Extract all diagram blocks from a Markdown document.
///
/// Never fails: unterminated blocks run to the end of the document and blank
/// blocks are skipped.
///
/// # Example
///
/// ```
/// let records = mdgram_diagrams::extract("# Title\n```mermaid\ngraph TD\nA-->B\n```\n");
///
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].title, "Title");
/// assert_eq!(records[0].content, "graph TD\nA-->B");
/// assert_eq!((records[0].start_line, records[0].end_line), (1, 4));
/// ```
#[must_use]
pub fn extract(markdown: &str) -> Vec<DiagramRecord> {
    DiagramExtractor::new().scan(markdown).diagrams
}

/// Extract only the trimmed diagram bodies.
///
/// Uses the same fence rules as [`extract`] without title inference.
#[must_use]
pub fn extract_raw(markdown: &str) -> Vec<String> {
    DiagramExtractor::new()
        .infer_titles(false)
        .scan(markdown)
        .diagrams
        .into_iter()
        .map(|d| d.content)
        .collect()
}

/// Configurable diagram block scanner.
///
/// Holds no per-document state, so one extractor can be shared across
/// threads and reused for any number of documents.
#[derive(Debug, Clone, Copy)]
pub struct DiagramExtractor {
    infer_titles: bool,
}

impl Default for DiagramExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagramExtractor {
    /// Create an extractor with heading-based title inference enabled.
    #[must_use]
    pub fn new() -> Self {
        Self { infer_titles: true }
    }

    /// Enable or disable title inference from preceding headings.
    ///
    /// When disabled, blocks without an explicit fence title get a
    /// synthesized `"Diagram N"` title.
    #[must_use]
    pub fn infer_titles(mut self, enabled: bool) -> Self {
        self.infer_titles = enabled;
        self
    }

    /// Scan a document and return its diagrams with scan statistics.
    #[must_use]
    pub fn scan(&self, markdown: &str) -> ExtractionSummary {
        let lines = split_lines(markdown);
        let mut collector = Collector::new(&lines);
        let mut state = ScanState::Outside;

        for (line_idx, &line) in lines.iter().enumerate() {
            state = match state {
                ScanState::Outside => match fence::parse_open(line) {
                    Some(open) => {
                        let title = open.title.map(str::to_owned).or_else(|| {
                            if self.infer_titles {
                                infer_title(&lines, line_idx)
                            } else {
                                None
                            }
                        });
                        tracing::trace!(line = line_idx, "Diagram block opened");
                        ScanState::Inside(OpenBlock {
                            start_line: line_idx,
                            title,
                            body: Vec::new(),
                        })
                    }
                    None => ScanState::Outside,
                },
                ScanState::Inside(mut block) => {
                    if fence::is_close(line) {
                        collector.finish(block, line_idx);
                        ScanState::Outside
                    } else {
                        block.body.push(line);
                        ScanState::Inside(block)
                    }
                }
            };
        }

        let unterminated = match state {
            ScanState::Inside(block) => {
                tracing::debug!(
                    start_line = block.start_line,
                    "Diagram block not closed before end of document"
                );
                collector.finish(block, lines.len() - 1);
                true
            }
            ScanState::Outside => false,
        };

        tracing::debug!(
            diagrams = collector.diagrams.len(),
            dropped_empty = collector.dropped_empty,
            "Diagram extraction completed"
        );

        ExtractionSummary {
            diagrams: collector.diagrams,
            line_count: lines.len(),
            dropped_empty: collector.dropped_empty,
            unterminated,
        }
    }
}

/// Split on `\n`, keeping every line and dropping a trailing `\r`.
///
/// Always returns at least one line; an empty document is one empty line.
fn split_lines(markdown: &str) -> Vec<&str> {
    markdown
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

enum ScanState<'a> {
    Outside,
    Inside(OpenBlock<'a>),
}

/// A diagram block whose closing fence has not been seen yet.
struct OpenBlock<'a> {
    start_line: usize,
    title: Option<String>,
    body: Vec<&'a str>,
}

/// Accumulates emitted records and assigns indexes.
struct Collector<'a, 'l> {
    lines: &'l [&'a str],
    diagrams: Vec<DiagramRecord>,
    dropped_empty: usize,
}

impl<'a, 'l> Collector<'a, 'l> {
    fn new(lines: &'l [&'a str]) -> Self {
        Self {
            lines,
            diagrams: Vec::new(),
            dropped_empty: 0,
        }
    }

    /// Close `block` at `end_line`, emitting a record unless the body is blank.
    fn finish(&mut self, block: OpenBlock<'a>, end_line: usize) {
        let content = block.body.join("\n").trim().to_owned();
        if content.is_empty() {
            tracing::trace!(start_line = block.start_line, "Dropped empty diagram block");
            self.dropped_empty += 1;
            return;
        }

        let index = self.diagrams.len();
        let title = block
            .title
            .unwrap_or_else(|| format!("{SYNTHESIZED_TITLE_PREFIX} {}", index + 1));

        self.diagrams.push(DiagramRecord {
            content,
            index,
            title,
            start_line: block.start_line,
            end_line,
            raw_block: self.lines[block.start_line..=end_line].join("\n"),
        });
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(
        index: usize,
        title: &str,
        content: &str,
        lines: (usize, usize),
        raw_block: &str,
    ) -> DiagramRecord {
        DiagramRecord {
            content: content.to_owned(),
            index,
            title: title.to_owned(),
            start_line: lines.0,
            end_line: lines.1,
            raw_block: raw_block.to_owned(),
        }
    }

    #[test]
    fn test_heading_titled_diagram() {
        let records = extract("# Title\n```mermaid\ngraph TD\nA-->B\n```\n");
        assert_eq!(
            records,
            vec![record(
                0,
                "Title",
                "graph TD\nA-->B",
                (1, 4),
                "```mermaid\ngraph TD\nA-->B\n```"
            )]
        );
    }

    #[test]
    fn test_two_consecutive_blocks() {
        let md = "```mermaid\ngraph TD\nA-->B\n```\n\n```mermaid\nsequenceDiagram\nA->>B: hi\n```";
        let records = extract(md);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].index, 0);
        assert_eq!((records[0].start_line, records[0].end_line), (0, 3));
        assert_eq!(records[1].index, 1);
        assert_eq!((records[1].start_line, records[1].end_line), (5, 8));
        assert_eq!(records[0].title, "Diagram 1");
        assert_eq!(records[1].title, "Diagram 2");
    }

    #[test]
    fn test_blank_body_dropped() {
        assert!(extract("```mermaid\n\n```").is_empty());
        assert!(extract("```mermaid\n   \n\t\n```").is_empty());
        assert!(extract("```mermaid\n```").is_empty());
    }

    #[test]
    fn test_blank_body_does_not_consume_index() {
        let md = "```mermaid\n\n```\n```mermaid\ngraph LR\n```";
        let records = extract(md);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].index, 0);
        assert_eq!(records[0].title, "Diagram 1");
        assert_eq!(records[0].start_line, 3);
    }

    #[test]
    fn test_unterminated_block() {
        let records = extract("```mermaid\ngraph TD\nA-->B");
        assert_eq!(
            records,
            vec![record(
                0,
                "Diagram 1",
                "graph TD\nA-->B",
                (0, 2),
                "```mermaid\ngraph TD\nA-->B"
            )]
        );
    }

    #[test]
    fn test_unterminated_block_with_trailing_newline() {
        let records = extract("```mermaid\ngraph TD\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].end_line, 2);
        assert_eq!(records[0].raw_block, "```mermaid\ngraph TD\n");
    }

    #[test]
    fn test_unterminated_blank_block_dropped() {
        let summary = DiagramExtractor::new().scan("text\n```mermaid\n  \n");
        assert!(summary.diagrams.is_empty());
        assert!(summary.unterminated);
        assert_eq!(summary.dropped_empty, 1);
    }

    #[test]
    fn test_explicit_title_beats_heading() {
        let records = extract("# Heading\n```mermaid Explicit\ngraph TD\n```");
        assert_eq!(records[0].title, "Explicit");
    }

    #[test]
    fn test_atx_beats_setext_when_nearer() {
        let md = "Setext\n======\n# Atx\n```mermaid\ngraph TD\n```";
        assert_eq!(extract(md)[0].title, "Atx");
    }

    #[test]
    fn test_setext_title() {
        let md = "Architecture\n------------\n\n```mermaid\ngraph TD\n```";
        assert_eq!(extract(md)[0].title, "Architecture");
    }

    #[test]
    fn test_synthesized_title_uses_emitted_index() {
        let md = "```mermaid\na\n```\nprose\n```mermaid\nb\n```\nprose\n```mermaid\nc\n```";
        let titles: Vec<_> = extract(md).into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["Diagram 1", "Diagram 2", "Diagram 3"]);
    }

    #[test]
    fn test_synonym_tags_identical() {
        let a = extract("# T\n```mermaid\ngraph TD\n```");
        let b = extract("# T\n```mmd\ngraph TD\n```");
        assert_eq!(a.len(), 1);
        assert_eq!(a[0].content, b[0].content);
        assert_eq!(a[0].title, b[0].title);
        assert_eq!(
            (a[0].start_line, a[0].end_line),
            (b[0].start_line, b[0].end_line)
        );
    }

    #[test]
    fn test_nested_fence_is_content() {
        let md = "```mermaid\ngraph TD\n```js\nA-->B\n```";
        let records = extract(md);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].content, "graph TD\n```js\nA-->B");
        assert_eq!(records[0].end_line, 4);
    }

    #[test]
    fn test_other_languages_ignored() {
        let md = "```rust\nfn main() {}\n```\n```mermaid\ngraph TD\n```";
        let records = extract(md);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].start_line, 3);
    }

    #[test]
    fn test_body_keeps_inner_indentation() {
        let md = "```mermaid\n\n  graph TD\n    A-->B\n\n```";
        assert_eq!(extract(md)[0].content, "graph TD\n    A-->B");
    }

    #[test]
    fn test_crlf_document() {
        let records = extract("# Title\r\n```mermaid\r\ngraph TD\r\n```\r\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Title");
        assert_eq!(records[0].content, "graph TD");
        assert_eq!(records[0].raw_block, "```mermaid\ngraph TD\n```");
    }

    #[test]
    fn test_empty_and_plain_documents() {
        assert!(extract("").is_empty());
        assert!(extract("# Just a heading\n\nSome text.").is_empty());
        let summary = DiagramExtractor::new().scan("");
        assert_eq!(summary.line_count, 1);
        assert!(!summary.unterminated);
    }

    #[test]
    fn test_disabled_title_inference() {
        let summary = DiagramExtractor::new()
            .infer_titles(false)
            .scan("# Heading\n```mermaid\ngraph TD\n```\n```mermaid Named\ngraph LR\n```");
        let titles: Vec<_> = summary.diagrams.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Diagram 1", "Named"]);
    }

    #[test]
    fn test_extract_raw() {
        let md = "# A\n```mermaid\ngraph TD\n```\n```mmd\n\n```\n```mermaid\npie\n";
        assert_eq!(extract_raw(md), vec!["graph TD".to_owned(), "pie".to_owned()]);
    }

    #[test]
    fn test_extract_raw_matches_extract() {
        let md = "Intro\n```mermaid T\nflowchart LR\n```\n\n## B\n```mermaid\n\n```\n```mermaid\nx\n";
        let contents: Vec<String> = extract(md).into_iter().map(|r| r.content).collect();
        assert_eq!(extract_raw(md), contents);
    }

    #[test]
    fn test_indexes_contiguous_and_lines_in_bounds() {
        let md = "\
# Doc
```mermaid
graph TD
```
```mermaid

```
Text
```mmd Named
pie
```
```mermaid
graph LR
A-->B";
        let summary = DiagramExtractor::new().scan(md);
        let line_count = summary.line_count;
        assert_eq!(line_count, 14);
        for (i, r) in summary.diagrams.iter().enumerate() {
            assert_eq!(r.index, i);
            assert!(r.start_line <= r.end_line);
            assert!(r.end_line < line_count);
        }
        assert_eq!(summary.diagrams.len(), 3);
        assert_eq!(summary.dropped_empty, 1);
        assert!(summary.unterminated);
    }

    #[test]
    fn test_idempotent() {
        let md = "# X\n```mermaid\ngraph TD\n```\n```mermaid\nA\n";
        assert_eq!(extract(md), extract(md));
    }

    #[test]
    fn test_thematic_break_after_code_block_is_not_title() {
        let md = "```js\nx\n```\n---\n```mermaid\ngraph TD\n```";
        let records = extract(md);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Diagram 1");
    }
}
