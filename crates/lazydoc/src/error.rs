//! Error types for lazydoc runs.

use std::path::PathBuf;

use lazydoc_syntax::{FormatError, ParseError};
use thiserror::Error;

use crate::report::FileStage;

/// Result type alias for lazydoc operations.
pub type Result<T> = std::result::Result<T, LazydocError>;

/// Error variants for comment synthesis runs.
#[derive(Debug, Error)]
pub enum LazydocError {
    /// Failed to read a source file.
    #[error("failed to read '{}': {error}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// The source file does not parse.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The mutated tree could not be rendered.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Failed to write the rendered file back.
    #[error("failed to write '{}': {error}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// The file or directory to process does not exist.
    #[error("no such file or directory: '{}'", .path.display())]
    TargetNotFound { path: PathBuf },

    /// Listing a directory failed.
    #[error("failed to list '{}': {source}", .path.display())]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
}

impl LazydocError {
    /// Pipeline stage the error belongs to.
    pub fn stage(&self) -> FileStage {
        match self {
            Self::Read { .. } | Self::TargetNotFound { .. } | Self::Walk { .. } => FileStage::Read,
            Self::Parse(_) => FileStage::Parsed,
            Self::Format(_) => FileStage::Serialized,
            Self::Write { .. } => FileStage::Written,
        }
    }
}
