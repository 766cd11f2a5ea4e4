//! `mdgram check` command implementation.

use clap::Args;
use mdgram_config::CliSettings;
use mdgram_diagrams::{DiagramCheck, DiagramExtractor, check_all};

use super::SourceArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::sources::{ExtractedFile, extract_files};

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    sources: SourceArgs,

    /// Report invalid diagrams without a failing exit status.
    #[arg(long)]
    no_fail: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if sources cannot be loaded, or if any diagram is
    /// invalid while `check.fail_on_invalid` is set.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let settings = CliSettings {
            fail_on_invalid: self.no_fail.then_some(false),
            ..Default::default()
        };
        let (config, files) = self.sources.resolve(settings)?;
        let results = extract_files(&files, DiagramExtractor::new())?;

        let report = CheckReport::build(&results);
        if !report.lines.is_empty() {
            output.data(&report.lines.join("\n"))?;
        }

        if report.invalid == 0 {
            output.success(&format!("All {} diagram(s) passed", report.checked));
            return Ok(());
        }

        output.warning(&format!(
            "{} of {} diagram(s) failed syntax check",
            report.invalid, report.checked
        ));
        if config.check.fail_on_invalid {
            return Err(CliError::InvalidDiagrams(report.invalid));
        }
        Ok(())
    }
}

/// Formatted check results for all files.
#[derive(Debug, Default)]
struct CheckReport {
    lines: Vec<String>,
    checked: usize,
    invalid: usize,
}

impl CheckReport {
    fn build(results: &[ExtractedFile]) -> Self {
        let mut report = Self::default();

        for file in results {
            if file.summary.diagrams.is_empty() {
                continue;
            }
            report.lines.push(file.path.display().to_string());
            for check in check_all(&file.summary.diagrams) {
                report.push(&check);
            }
        }

        report
    }

    fn push(&mut self, check: &DiagramCheck) {
        self.checked += 1;
        let label = format!(
            "#{} {} (line {})",
            check.index,
            check.title,
            check.start_line + 1
        );
        match &check.result {
            Ok(kind) => self.lines.push(format!("  ok     {label}: {}", kind.keyword())),
            Err(e) => {
                self.invalid += 1;
                self.lines.push(format!("  error  {label}: {e}"));
            }
        }
    }
}
