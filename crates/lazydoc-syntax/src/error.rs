//! Error types for parsing and printing Go sources

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Source text could not be turned into a [`SyntaxTree`](crate::SyntaxTree).
#[derive(Error, Debug, Diagnostic)]
pub enum ParseError {
    /// The grammar rejected the input
    #[error("{}:{line}:{column}: {message}", .path.display())]
    #[diagnostic(code(lazydoc::syntax::invalid_source))]
    Syntax {
        path: PathBuf,
        line: u32,
        column: u32,
        message: String,
    },

    /// The parser could not be configured or gave up
    #[error("{}: parser unavailable: {reason}", .path.display())]
    #[diagnostic(code(lazydoc::syntax::parser_unavailable))]
    Unavailable { path: PathBuf, reason: String },
}

impl ParseError {
    /// Create a Syntax error
    pub fn syntax(
        path: impl Into<PathBuf>,
        line: u32,
        column: u32,
        message: impl Into<String>,
    ) -> Self {
        Self::Syntax {
            path: path.into(),
            line,
            column,
            message: message.into(),
        }
    }

    /// File the error refers to
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Syntax { path, .. } | Self::Unavailable { path, .. } => path,
        }
    }
}

/// A mutated tree could not be rendered back to source text.
#[derive(Error, Debug, Diagnostic)]
pub enum FormatError {
    /// A declaration references a doc group that is not in the tree's comment list
    #[error("doc comment for '{name}' at offset {pos} is missing from the comment list")]
    #[diagnostic(
        code(lazydoc::format::dangling_comment),
        help("rebuild the comment list with SyntaxTree::refresh_comments before printing")
    )]
    DanglingComment { name: String, pos: u32 },

    /// Two doc slots claim intersecting source ranges
    #[error("doc comment edits overlap at offsets {first}..{second}")]
    #[diagnostic(code(lazydoc::format::overlapping_edits))]
    OverlappingEdits { first: u32, second: u32 },

    /// A span points outside the source text
    #[error("span {start}..{end} is outside the source ({len} bytes)")]
    #[diagnostic(code(lazydoc::format::span_out_of_range))]
    SpanOutOfRange { start: u32, end: u32, len: usize },

    /// The rendered text no longer parses
    #[error("rendered source for {} is invalid: {reason}", .path.display())]
    #[diagnostic(code(lazydoc::format::invalid_output))]
    InvalidOutput { path: PathBuf, reason: String },
}

/// Result type for parse operations
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Result type for print operations
pub type FormatResult<T> = std::result::Result<T, FormatError>;
