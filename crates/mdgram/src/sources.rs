//! Markdown source discovery and per-file extraction.
//!
//! Discovery walks directories, keeps files with a configured extension and
//! drops excluded paths. Extraction then reads and scans the files in
//! parallel on the global rayon pool, preserving discovery order.

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use mdgram_config::SourcesConfig;
use mdgram_diagrams::{DiagramExtractor, ExtractionSummary};
use rayon::prelude::*;

use crate::error::CliError;

/// Extraction result for one Markdown file.
#[derive(Debug)]
pub(crate) struct ExtractedFile {
    pub path: PathBuf,
    pub summary: ExtractionSummary,
}

/// Finds Markdown files to extract from.
pub(crate) struct Discovery {
    extensions: Vec<String>,
    exclude: Vec<Pattern>,
}

impl Discovery {
    /// Build discovery rules from resolved configuration.
    ///
    /// Exclude patterns are validated during config load, so an invalid one
    /// here is skipped.
    pub fn new(sources: &SourcesConfig) -> Self {
        let exclude = sources
            .exclude
            .iter()
            .filter_map(|p| Pattern::new(p).ok())
            .collect();
        Self {
            extensions: sources
                .extensions
                .iter()
                .map(|e| e.to_lowercase())
                .collect(),
            exclude,
        }
    }

    /// Resolve command line paths into a sorted, deduplicated file list.
    ///
    /// Files are taken as given, regardless of extension. Directories are
    /// walked recursively.
    pub fn discover(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>, CliError> {
        let mut files = Vec::new();

        for path in paths {
            if path.is_file() {
                files.push(path.clone());
            } else if path.is_dir() {
                self.walk(path, path, &mut files);
            } else {
                return Err(CliError::NotFound(path.clone()));
            }
        }

        files.sort();
        files.dedup();
        tracing::info!(count = files.len(), "Discovered Markdown files");
        Ok(files)
    }

    fn walk(&self, root: &Path, dir: &Path, files: &mut Vec<PathBuf>) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %dir.display(), error = %e, "Failed to read directory");
                return;
            }
        };

        for entry in entries.filter_map(Result::ok) {
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }

            let path = entry.path();
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());

            if is_dir {
                self.walk(root, &path, files);
            } else if self.is_markdown(&path) && !self.is_excluded(root, &path) {
                files.push(path);
            }
        }
    }

    fn is_markdown(&self, path: &Path) -> bool {
        path.extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .is_some_and(|e| self.extensions.contains(&e))
    }

    fn is_excluded(&self, root: &Path, path: &Path) -> bool {
        let rel = path.strip_prefix(root).unwrap_or(path);
        self.exclude.iter().any(|p| p.matches_path(rel))
    }
}

/// Read and scan every file in parallel.
///
/// Output order matches `paths`. The first unreadable file aborts the run.
pub(crate) fn extract_files(
    paths: &[PathBuf],
    extractor: DiagramExtractor,
) -> Result<Vec<ExtractedFile>, CliError> {
    paths
        .par_iter()
        .map(|path| {
            let text = fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.clone(),
                source,
            })?;
            let summary = extractor.scan(&text);
            tracing::debug!(
                path = %path.display(),
                diagrams = summary.diagrams.len(),
                "Extracted diagrams"
            );
            Ok(ExtractedFile {
                path: path.clone(),
                summary,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sources(exclude: &[&str]) -> SourcesConfig {
        SourcesConfig {
            exclude: exclude.iter().map(|&s| s.to_owned()).collect(),
            ..SourcesConfig::default()
        }
    }

    fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_discover_walks_directories() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let a = write(root, "a.md", "");
        let b = write(root, "guide/b.markdown", "");
        write(root, "notes.txt", "");
        write(root, ".hidden/c.md", "");
        write(root, ".d.md", "");

        let files = Discovery::new(&sources(&[]))
            .discover(&[root.to_path_buf()])
            .unwrap();

        assert_eq!(files, vec![a, b]);
    }

    #[test]
    fn test_discover_extension_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let upper = write(dir.path(), "README.MD", "");

        let files = Discovery::new(&sources(&[]))
            .discover(&[dir.path().to_path_buf()])
            .unwrap();

        assert_eq!(files, vec![upper]);
    }

    #[test]
    fn test_discover_excludes() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let keep = write(root, "docs/keep.md", "");
        write(root, "node_modules/pkg/readme.md", "");
        write(root, "docs/drafts/wip.md", "");

        let files = Discovery::new(&sources(&["**/node_modules/**", "docs/drafts/*"]))
            .discover(&[root.to_path_buf()])
            .unwrap();

        assert_eq!(files, vec![keep]);
    }

    #[test]
    fn test_discover_explicit_file_any_extension() {
        let dir = tempfile::tempdir().unwrap();
        let txt = write(dir.path(), "diagram.txt", "");

        let files = Discovery::new(&sources(&[]))
            .discover(&[txt.clone(), txt.clone()])
            .unwrap();

        assert_eq!(files, vec![txt]);
    }

    #[test]
    fn test_discover_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.md");

        let err = Discovery::new(&sources(&[]))
            .discover(&[missing])
            .unwrap_err();

        assert!(matches!(err, CliError::NotFound(_)));
    }

    #[test]
    fn test_extract_files_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let paths: Vec<PathBuf> = (0..8)
            .map(|i| {
                let body = "```mermaid\ngraph TD\n```\n".repeat(i);
                write(root, &format!("doc{i}.md"), &body)
            })
            .collect();

        let results = extract_files(&paths, DiagramExtractor::new()).unwrap();

        assert_eq!(results.len(), 8);
        for (i, file) in results.iter().enumerate() {
            assert_eq!(file.path, paths[i]);
            assert_eq!(file.summary.diagrams.len(), i);
        }
    }

    #[test]
    fn test_extract_files_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.md");

        let err = extract_files(&[missing], DiagramExtractor::new()).unwrap_err();

        assert!(matches!(err, CliError::Read { .. }));
    }
}
