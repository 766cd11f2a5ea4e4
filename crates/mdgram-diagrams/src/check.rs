//! Lightweight syntax checks for extracted Mermaid sources.
//!
//! These checks catch the mistakes that make a renderer reject a diagram
//! outright: a missing or misspelled diagram declaration, a bad flowchart
//! direction, and unbalanced node brackets. They do not parse Mermaid.
//!
//! Each record is checked on its own; one broken diagram never affects the
//! report of another.

use crate::kind::DiagramKind;
use crate::record::DiagramRecord;

/// Flowchart layout directions.
const DIRECTIONS: &[&str] = &["TB", "TD", "BT", "RL", "LR"];

/// Syntax problem found in a diagram body.
///
/// Line numbers are 1-based and relative to the diagram body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    /// Body contains only blank lines, comments, or front matter.
    #[error("No diagram declaration found")]
    MissingDeclaration,
    /// Front matter opened with `---` but never closed.
    #[error("Front matter starting on line {line} is not closed")]
    UnclosedFrontMatter { line: usize },
    /// First statement is not a known diagram type.
    #[error("Unknown diagram type `{keyword}` on line {line}")]
    UnknownDiagramType { keyword: String, line: usize },
    /// Flowchart declared with an unsupported direction.
    #[error("Invalid flowchart direction `{direction}` on line {line}")]
    InvalidDirection { direction: String, line: usize },
    /// Bracket closed without a matching opener, or never closed.
    #[error("Unbalanced `{delimiter}` on line {line}")]
    UnbalancedDelimiter { delimiter: char, line: usize },
    /// Double-quoted string not closed on the line it starts.
    #[error("Unclosed quote on line {line}")]
    UnclosedQuote { line: usize },
}

/// Check result for one extracted diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramCheck {
    /// Index of the checked record.
    pub index: usize,
    /// Title of the checked record.
    pub title: String,
    /// Document line of the record's opening fence.
    pub start_line: usize,
    /// Detected diagram type, or the first problem found.
    pub result: Result<DiagramKind, SyntaxError>,
}

impl DiagramCheck {
    /// Whether the diagram passed all checks.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Check every record independently.
#[must_use]
pub fn check_all(records: &[DiagramRecord]) -> Vec<DiagramCheck> {
    records
        .iter()
        .map(|record| {
            let result = check_diagram(&record.content);
            if let Err(e) = &result {
                tracing::debug!(index = record.index, error = %e, "Diagram failed syntax check");
            }
            DiagramCheck {
                index: record.index,
                title: record.title.clone(),
                start_line: record.start_line,
                result,
            }
        })
        .collect()
}

/// Check a single diagram body.
///
/// # Errors
///
/// Returns the first [`SyntaxError`] found, scanning top to bottom.
pub fn check_diagram(content: &str) -> Result<DiagramKind, SyntaxError> {
    let lines: Vec<(usize, &str)> = content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .collect();

    let mut statements = lines
        .iter()
        .copied()
        .filter(|(_, line)| !line.is_empty() && !is_comment(line))
        .peekable();

    if let Some(&(line, "---")) = statements.peek() {
        statements.next();
        if !statements.by_ref().any(|(_, l)| l == "---") {
            return Err(SyntaxError::UnclosedFrontMatter { line });
        }
    }

    let (decl_line, declaration) = statements.next().ok_or(SyntaxError::MissingDeclaration)?;
    let (keyword, mut rest) = next_token(declaration);
    let kind = DiagramKind::parse(keyword).ok_or_else(|| SyntaxError::UnknownDiagramType {
        keyword: keyword.to_owned(),
        line: decl_line,
    })?;

    if kind.has_direction() {
        if !rest.trim_start().starts_with(';') {
            let (direction, after) = next_token(rest);
            if !direction.is_empty() && !DIRECTIONS.contains(&direction) {
                return Err(SyntaxError::InvalidDirection {
                    direction: direction.to_owned(),
                    line: decl_line,
                });
            }
            rest = after;
        }
        // Statements may follow the declaration on the same line after `;`
        check_delimiters(std::iter::once((decl_line, rest)).chain(statements))?;
    }

    Ok(kind)
}

/// Split off the leading token, which ends at whitespace or `;`.
fn next_token(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    let end = s
        .find(|c: char| c.is_whitespace() || c == ';')
        .unwrap_or(s.len());
    s.split_at(end)
}

/// `%%` comments and `%%{init: ...}%%` directives.
fn is_comment(line: &str) -> bool {
    line.starts_with("%%")
}

/// Check bracket balance across flowchart statements.
///
/// Quoted text and `|edge label|` text are ignored. An asymmetric node shape
/// (`id>label]`) opens with a `>` directly after a node id; inside a shape
/// label `>` is plain text.
fn check_delimiters<'a>(
    statements: impl Iterator<Item = (usize, &'a str)>,
) -> Result<(), SyntaxError> {
    let mut stack: Vec<(char, usize)> = Vec::new();

    for (line_no, line) in statements {
        let mut in_quote = false;
        let mut in_edge_label = false;
        let mut prev: Option<char> = None;
        let mut chars = line.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '"' {
                in_quote = !in_quote;
            } else if !in_quote && c == '|' && stack.is_empty() {
                in_edge_label = !in_edge_label;
            } else if !in_quote && !in_edge_label {
                match c {
                    '[' | '(' | '{' => stack.push((c, line_no)),
                    '>' if stack.is_empty()
                        && prev.is_some_and(|p| p.is_alphanumeric() || p == '_')
                        && chars.peek() != Some(&'>') =>
                    {
                        stack.push((c, line_no));
                    }
                    ']' | ')' | '}' => {
                        let matched = stack.pop().is_some_and(|(open, _)| {
                            matches!((open, c), ('[' | '>', ']') | ('(', ')') | ('{', '}'))
                        });
                        if !matched {
                            return Err(SyntaxError::UnbalancedDelimiter {
                                delimiter: c,
                                line: line_no,
                            });
                        }
                    }
                    _ => {}
                }
            }
            prev = Some(c);
        }

        if in_quote {
            return Err(SyntaxError::UnclosedQuote { line: line_no });
        }
    }

    match stack.pop() {
        Some((delimiter, line)) => Err(SyntaxError::UnbalancedDelimiter { delimiter, line }),
        None => Ok(()),
    }
}
