//! `mdgram extract` command implementation.

use clap::Args;
use mdgram_config::{CliSettings, OutputFormat};
use mdgram_diagrams::DiagramExtractor;
use serde::Serialize;

use super::{SourceArgs, display_lines};
use crate::error::CliError;
use crate::output::Output;
use crate::sources::{ExtractedFile, extract_files};

/// Arguments for the extract command.
#[derive(Args)]
pub(crate) struct ExtractArgs {
    #[command(flatten)]
    sources: SourceArgs,

    /// Output format: json or text (overrides config).
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Emit only diagram bodies, without titles or line ranges.
    #[arg(long)]
    raw: bool,

    /// Print JSON on a single line.
    #[arg(long)]
    compact: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ExtractArgs {
    /// Execute the extract command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, a path is missing, or a file
    /// cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let settings = CliSettings {
            format: self.format,
            pretty: self.compact.then_some(false),
            ..Default::default()
        };
        let (config, files) = self.sources.resolve(settings)?;

        if files.is_empty() {
            output.warning("No Markdown files found");
        }

        let extractor = DiagramExtractor::new().infer_titles(!self.raw);
        let results = extract_files(&files, extractor)?;

        for file in &results {
            if file.summary.unterminated {
                output.warning(&format!(
                    "{}: last diagram block is not closed",
                    file.path.display()
                ));
            }
        }

        let rendered = match config.output.format {
            OutputFormat::Json => render_json(&results, self.raw, config.output.pretty)?,
            OutputFormat::Text => render_text(&results, self.raw),
        };
        output.data(&rendered)?;

        let diagrams: usize = results.iter().map(|f| f.summary.diagrams.len()).sum();
        output.info(&format!(
            "Extracted {diagrams} diagram(s) from {} file(s)",
            results.len()
        ));

        Ok(())
    }
}

/// Per-file JSON entry.
#[derive(Serialize)]
struct FileReport<T> {
    path: String,
    diagrams: T,
}

fn render_json(
    results: &[ExtractedFile],
    raw: bool,
    pretty: bool,
) -> Result<String, serde_json::Error> {
    fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
    }

    if raw {
        let reports: Vec<_> = results
            .iter()
            .map(|f| FileReport {
                path: f.path.display().to_string(),
                diagrams: f
                    .summary
                    .diagrams
                    .iter()
                    .map(|d| d.content.as_str())
                    .collect::<Vec<_>>(),
            })
            .collect();
        to_json(&reports, pretty)
    } else {
        let reports: Vec<_> = results
            .iter()
            .map(|f| FileReport {
                path: f.path.display().to_string(),
                diagrams: f.summary.diagrams.as_slice(),
            })
            .collect();
        to_json(&reports, pretty)
    }
}

fn render_text(results: &[ExtractedFile], raw: bool) -> String {
    let mut lines = Vec::new();

    for file in results {
        let diagrams = &file.summary.diagrams;
        lines.push(format!(
            "{} ({} diagram{})",
            file.path.display(),
            diagrams.len(),
            if diagrams.len() == 1 { "" } else { "s" }
        ));
        for d in diagrams {
            if raw {
                lines.push(format!("%% #{}", d.index));
                lines.extend(d.content.lines().map(str::to_owned));
            } else {
                lines.push(format!(
                    "  #{} {} ({})",
                    d.index,
                    d.title,
                    display_lines(d.start_line, d.end_line)
                ));
            }
        }
    }

    lines.join("\n")
}
