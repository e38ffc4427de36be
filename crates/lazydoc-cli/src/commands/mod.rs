//! Command implementations for the lazydoc CLI.
//!
//! - [`run`] - annotate a Go file or directory in place

pub mod run;

pub use run::execute as run_execute;
