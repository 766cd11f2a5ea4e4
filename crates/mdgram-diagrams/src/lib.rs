//! Mermaid diagram extraction for Markdown documents.
//!
//! This crate finds fenced Mermaid blocks in Markdown and turns them into
//! ordered [`DiagramRecord`]s with source-line provenance:
//! - [`extract`] returns full records (content, index, title, line range, raw block)
//! - [`extract_raw`] returns only the trimmed diagram bodies
//! - [`DiagramExtractor`] exposes scan statistics and title inference control
//! - [`check_diagram`] and [`check_all`] run light syntax checks on extracted sources
//!
//! # Architecture
//!
//! The crate is organized into modules:
//! - [`fence`]: Opening and closing fence recognition (`mermaid` and `mmd` tags)
//! - [`heading`]: Title inference from ATX and Setext headings above a fence
//! - [`extractor`]: Single-pass line scanner producing records
//! - [`kind`]: Mermaid diagram type declarations
//! - [`check`]: Per-diagram syntax checks
//!
//! Extraction is pure and infallible. The same input always produces the
//! same records, and any input (empty, fence-free, unterminated) produces a
//! well-formed, possibly empty, result.
//!
//! # Example
//!
//! ```
//! use mdgram_diagrams::{check_all, extract};
//!
//! let markdown = "## Login\n```mermaid\nsequenceDiagram\nUser->>App: login\n```\n";
//! let records = extract(markdown);
//!
//! assert_eq!(records[0].title, "Login");
//! assert!(check_all(&records).iter().all(|c| c.is_ok()));
//! ```

mod check;
mod consts;
mod extractor;
mod fence;
mod heading;
mod kind;
mod record;

pub use check::{DiagramCheck, SyntaxError, check_all, check_diagram};
pub use consts::TITLE_LOOKBACK;
pub use extractor::{DiagramExtractor, extract, extract_raw};
pub use kind::DiagramKind;
pub use record::{DiagramRecord, ExtractionSummary};
