//! Placeholder doc comments for undocumented Go declarations
//!
//! `lazydoc` parses Go source files, finds top-level declarations that lack a
//! doc comment and gives them one of the form `// <Name> <default text>`.
//! Existing documentation is never overwritten, and the rest of each file is
//! reproduced byte for byte.
//!
//! The pass is split into small pieces:
//!
//! - [`classify()`] decides which declarations qualify and under which identity
//! - [`VisitLedger`] counts identities; a name seen more than twice in a file
//!   gets its doc cleared instead of a default
//! - [`CommentSynthesizer`] writes the new comment groups into the tree
//! - [`LazyCommenter`] drives files and directories, isolating failures
//!
//! # Example
//!
//! ```rust
//! use std::path::Path;
//! use lazydoc::{CommentOptions, LazyCommenter};
//!
//! let commenter = LazyCommenter::new(CommentOptions::new("does a thing"));
//! let annotated = commenter.annotate_source(
//!     Path::new("p.go"),
//!     "package p\n\nfunc Foo() {}\n",
//! )?;
//! assert_eq!(annotated.output, "package p\n\n// Foo does a thing\nfunc Foo() {}\n");
//! # Ok::<(), lazydoc::LazydocError>(())
//! ```

pub mod classify;
pub mod commenter;
pub mod error;
pub mod ledger;
pub mod options;
pub mod pass;
pub mod report;
pub mod synthesize;

pub use classify::{Candidate, Classification, Target, classify};
pub use commenter::{Annotated, LazyCommenter, source_files};
pub use error::{LazydocError, Result};
pub use ledger::{IdentityKey, VISIT_THRESHOLD, VisitLedger};
pub use options::{CommentOptions, DEFAULT_COMMENT};
pub use pass::annotate_tree;
pub use report::{FileFailure, FileOutcome, FileReport, FileStage, RunReport};
pub use synthesize::{CommentSynthesizer, SynthesisReport};
