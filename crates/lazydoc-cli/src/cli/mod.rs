//! Command-line interface definition for lazydoc.
//!
//! The tool takes two optional flags; anything not given on the command line
//! comes from `lazydoc.toml` or `LAZYDOC_*` environment variables (see
//! [`crate::config`]).

use clap::Parser;
use std::path::PathBuf;

/// lazydoc - placeholder doc comments for undocumented Go declarations
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "lazydoc",
    version,
    about = "Adds placeholder doc comments to undocumented Go declarations",
    long_about = "lazydoc parses Go source files and gives every exported function and type,\n\
                  and every package-level variable and constant, that lacks a doc comment a\n\
                  comment of the form `// <Name> <comment>`. Files are rewritten in place;\n\
                  existing documentation is never changed."
)]
pub struct Cli {
    /// Text placed after the declaration name in each synthesized comment
    ///
    /// Defaults to `--default comment--`. An empty value also falls back to
    /// the default.
    #[arg(short = 'c', long = "comment", value_name = "TEXT")]
    pub comment: Option<String>,

    /// Go file, or directory whose `*.go` files are processed
    ///
    /// Subdirectories are not visited.
    #[arg(short = 'd', long = "dir", value_name = "PATH")]
    pub dir: Option<PathBuf>,
}
