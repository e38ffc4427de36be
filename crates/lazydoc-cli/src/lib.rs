//! lazydoc CLI - placeholder doc comments for undocumented Go declarations.
//!
//! The binary wraps the `lazydoc` library:
//!
//! - [`cli`] - clap argument definitions (`-c/--comment`, `-d/--dir`)
//! - [`config`] - layered configuration (flags, `LAZYDOC_*`, `lazydoc.toml`)
//! - [`commands`] - the annotate run itself
//! - [`error`] - error types and miette rendering
//! - [`logger`] - tracing setup, logging to stderr
//!
//! # Example
//!
//! ```rust,no_run
//! use lazydoc_cli::{cli::Cli, commands, config::LazydocConfig, error::Result};
//!
//! fn main() -> Result<()> {
//!     let args = Cli { comment: None, dir: Some("pkg".into()) };
//!     let config = LazydocConfig::load(&args)?;
//!     commands::run_execute(&config, &mut std::io::stdout())?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;

pub use error::{CliError, ConfigError, Result, ResultExt};
