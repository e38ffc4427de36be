//! Go syntax services for lazydoc
//!
//! This crate provides the two external collaborators the comment synthesis
//! pass relies on, behind small traits so the pass can be tested against
//! in-memory trees:
//!
//! - [`SourceParser`] / [`GoParser`] - tree-sitter backed parsing into a
//!   mutable [`SyntaxTree`] with doc comments attached the way `go/parser`
//!   attaches them
//! - [`SourceFormatter`] / [`GoPrinter`] - renders a mutated tree by splicing
//!   changed doc comments into the original text
//!
//! # Example
//!
//! ```rust
//! use std::path::Path;
//! use lazydoc_syntax::{
//!     CommentGroup, Decl, GoParser, GoPrinter, Pos, SourceFormatter, SourceParser,
//! };
//!
//! let mut tree = GoParser.parse(Path::new("a.go"), "package a\n\nfunc Foo() {}\n")?;
//! if let Some(Decl::Func(foo)) = tree.decls.get_mut(1) {
//!     foo.doc = Some(CommentGroup::single_line("Foo is documented", Pos(foo.pos().0 - 1)));
//! }
//! tree.refresh_comments();
//!
//! let out = GoPrinter::default().format(&tree)?;
//! assert_eq!(out, "package a\n\n// Foo is documented\nfunc Foo() {}\n");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod ast;
mod error;
mod format;
mod parser;
mod pos;
mod printer;

pub use ast::{
    Comment, CommentGroup, Decl, DocSlot, FuncDecl, GenDecl, GenKind, Ident, ImportSpec, Leading,
    OtherDecl, Spec, SyntaxTree, TypeSpec, ValueSpec, doc_text, is_exported,
};
pub use error::{FormatError, FormatResult, ParseError, ParseResult};
pub use format::FormatOptions;
pub use parser::{GoParser, SourceParser};
pub use pos::{LineIndex, Pos, Position, Span};
pub use printer::{GoPrinter, SourceFormatter};
