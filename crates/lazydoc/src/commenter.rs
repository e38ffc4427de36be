//! File and directory orchestration.

use std::fs;
use std::path::{Path, PathBuf};

use lazydoc_syntax::{FormatError, GoParser, GoPrinter, SourceFormatter, SourceParser};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{LazydocError, Result};
use crate::options::CommentOptions;
use crate::pass::annotate_tree;
use crate::report::{FileFailure, FileOutcome, FileReport, FileStage, RunReport};
use crate::synthesize::SynthesisReport;

/// Output of annotating one source text.
#[derive(Debug, Clone)]
pub struct Annotated {
    /// Rendered file content.
    pub output: String,
    pub synthesis: SynthesisReport,
}

impl Annotated {
    /// `true` when the output differs from `source`.
    pub fn changed(&self, source: &str) -> bool {
        self.output != source
    }
}

/// Runs the synthesis pass over files using a parser and a formatter.
///
/// Failures are isolated per file: a file that cannot be read, parsed,
/// rendered or written is reported and left as it was on disk, and the run
/// moves on to the next file.
#[derive(Debug, Clone)]
pub struct LazyCommenter<P = GoParser, F = GoPrinter> {
    parser: P,
    formatter: F,
    options: CommentOptions,
}

impl LazyCommenter {
    /// Commenter backed by the tree-sitter Go parser and the splicing printer.
    pub fn new(options: CommentOptions) -> Self {
        Self::with_services(GoParser, GoPrinter::default(), options)
    }
}

impl<P, F> LazyCommenter<P, F>
where
    P: SourceParser,
    F: SourceFormatter,
{
    pub fn with_services(parser: P, formatter: F, options: CommentOptions) -> Self {
        Self {
            parser,
            formatter,
            options,
        }
    }

    pub fn options(&self) -> &CommentOptions {
        &self.options
    }

    /// Parses `source`, synthesizes missing docs and renders the result.
    ///
    /// Nothing touches the filesystem here; `path` is only used for
    /// diagnostics.
    pub fn annotate_source(&self, path: &Path, source: &str) -> Result<Annotated> {
        let mut tree = self.parser.parse(path, source)?;
        debug!(path = %path.display(), stage = %FileStage::Parsed, decls = tree.decls.len());

        let synthesis = annotate_tree(&mut tree, &self.options);
        debug!(
            path = %path.display(),
            stage = %FileStage::Synthesized,
            synthesized = synthesis.synthesized.len(),
            cleared = synthesis.cleared.len()
        );

        let output = self.formatter.format(&tree)?;
        debug!(path = %path.display(), stage = %FileStage::Serialized, bytes = output.len());

        // the rendered text must still parse before it may replace the file
        self.parser
            .parse(path, &output)
            .map_err(|err| FormatError::InvalidOutput {
                path: path.to_path_buf(),
                reason: err.to_string(),
            })?;

        Ok(Annotated { output, synthesis })
    }

    /// Annotates a single file in place.
    ///
    /// The file is only written when every earlier stage succeeded.
    pub fn process_file(&self, path: &Path) -> Result<FileReport> {
        let source = fs::read_to_string(path).map_err(|error| LazydocError::Read {
            path: path.to_path_buf(),
            error,
        })?;

        let annotated = self.annotate_source(path, &source)?;

        fs::write(path, &annotated.output).map_err(|error| LazydocError::Write {
            path: path.to_path_buf(),
            error,
        })?;

        info!(
            path = %path.display(),
            synthesized = annotated.synthesis.synthesized.len(),
            cleared = annotated.synthesis.cleared.len(),
            "processed file"
        );

        Ok(FileReport {
            path: path.to_path_buf(),
            synthesis: annotated.synthesis,
        })
    }

    /// Processes a single file, or every Go file directly inside a directory.
    ///
    /// Only a missing target or an unreadable directory fail the whole run;
    /// per-file errors end up in the returned [`RunReport`].
    pub fn process_target(&self, target: &Path) -> Result<RunReport> {
        if !target.exists() {
            return Err(LazydocError::TargetNotFound {
                path: target.to_path_buf(),
            });
        }

        let files = if target.is_dir() {
            source_files(target)?
        } else {
            vec![target.to_path_buf()]
        };
        debug!(root = %target.display(), files = files.len(), "collected source files");

        let mut report = RunReport::default();
        for path in files {
            let outcome = match self.process_file(&path) {
                Ok(file) => FileOutcome::Done(file),
                Err(error) => {
                    let failure = FileFailure::new(path, error);
                    debug!(stage = %failure.stage, "file skipped: {}", failure.error);
                    FileOutcome::Failed(failure)
                }
            };
            report.files.push(outcome);
        }
        Ok(report)
    }
}

/// Go source files directly inside `dir`, sorted by name.
pub fn source_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|source| LazydocError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        let is_go = entry.path().extension().is_some_and(|ext| ext == "go");
        if entry.file_type().is_file() && is_go {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
