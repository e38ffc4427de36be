//! Error types for the lazydoc CLI.
//!
//! - **Top-level errors** (`CliError`) are what commands return
//! - **Configuration errors** (`ConfigError`) carry a hint for the user
//! - Errors from the `lazydoc` library convert automatically via `#[from]`
//!
//! Only errors that stop the whole run end up here. A file that fails to
//! parse or render is reported and skipped by the library instead.

mod diagnostic;

use std::path::PathBuf;
use thiserror::Error;

use lazydoc::LazydocError;

pub use diagnostic::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration-related errors (missing target, invalid values)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Target file or directory not found
    #[error("File not found: {}\n\nHint: Pass an existing Go file or directory with --dir", .0.display())]
    FileNotFound(PathBuf),

    /// Errors from the comment synthesis run
    #[error(transparent)]
    Lazydoc(#[from] LazydocError),

    /// I/O errors, e.g. while writing the file list
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required configuration field
    #[error("Missing required field: {field}\n\nHint: {hint}")]
    MissingField {
        /// Name of the missing field
        field: String,
        /// Helpful hint for providing the field
        hint: String,
    },

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turns a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use std::path::Path;
    /// # use lazydoc_cli::error::{CliError, ResultExt};
    /// let path = Path::new("does/not/exist.go");
    /// let err = std::fs::metadata(path).with_path(path).unwrap_err();
    /// assert!(matches!(err, CliError::FileNotFound(_)));
    /// ```
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Prefixes the error message with `msg`.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            CliError::Lazydoc(LazydocError::TargetNotFound { path }) => {
                CliError::FileNotFound(path)
            }
            other => other,
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}
