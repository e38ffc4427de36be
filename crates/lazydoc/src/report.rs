//! Per-file and per-run outcomes.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::LazydocError;
use crate::synthesize::SynthesisReport;

/// Linear pipeline every file goes through.
///
/// `Classified` and `Synthesized` are in-memory steps over an already parsed
/// tree and cannot fail, so no [`FileFailure`] ever names them; they only
/// appear in debug logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FileStage {
    Read,
    Parsed,
    Classified,
    Synthesized,
    Serialized,
    Written,
}

impl fmt::Display for FileStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileStage::Read => "read",
            FileStage::Parsed => "parse",
            FileStage::Classified => "classify",
            FileStage::Synthesized => "synthesize",
            FileStage::Serialized => "serialize",
            FileStage::Written => "write",
        };
        f.write_str(name)
    }
}

/// A file that made it through every stage.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub synthesis: SynthesisReport,
}

/// A file that stopped at `stage`; its content on disk is unchanged.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub stage: FileStage,
    pub error: LazydocError,
}

impl FileFailure {
    pub fn new(path: impl Into<PathBuf>, error: LazydocError) -> Self {
        Self {
            path: path.into(),
            stage: error.stage(),
            error,
        }
    }
}

impl fmt::Display for FileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} failed): {}", self.path.display(), self.stage, self.error)
    }
}

/// Result for one file of a run.
#[derive(Debug)]
pub enum FileOutcome {
    Done(FileReport),
    Failed(FileFailure),
}

impl FileOutcome {
    pub fn path(&self) -> &Path {
        match self {
            FileOutcome::Done(report) => &report.path,
            FileOutcome::Failed(failure) => &failure.path,
        }
    }
}

/// Outcome of processing a file or a directory.
#[derive(Debug, Default)]
pub struct RunReport {
    /// One entry per file, in processing order.
    pub files: Vec<FileOutcome>,
}

impl RunReport {
    pub fn processed(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter_map(|outcome| match outcome {
            FileOutcome::Done(report) => Some(report),
            FileOutcome::Failed(_) => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileFailure> {
        self.files.iter().filter_map(|outcome| match outcome {
            FileOutcome::Failed(failure) => Some(failure),
            FileOutcome::Done(_) => None,
        })
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    /// Total comments synthesized across all files.
    pub fn comments_synthesized(&self) -> usize {
        self.processed()
            .map(|report| report.synthesis.synthesized.len())
            .sum()
    }
}
