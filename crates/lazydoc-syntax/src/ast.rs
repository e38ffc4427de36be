//! Mutable syntax tree for a single Go source file.
//!
//! Only the top level is modelled in detail: functions, methods and the
//! `import`/`const`/`type`/`var` groups together with their doc comments.
//! Everything else is kept as opaque source text and re-emitted verbatim by
//! the printer.

use std::fmt;
use std::path::PathBuf;

use crate::pos::{Pos, Span};

/// Returns `true` when `name` is visible outside its package.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Identifier with the position of its first byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    pub name: String,
    pub pos: Pos,
}

impl Ident {
    pub fn new(name: impl Into<String>, pos: Pos) -> Self {
        Self {
            name: name.into(),
            pos,
        }
    }

    pub fn is_exported(&self) -> bool {
        is_exported(&self.name)
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// =============================================================================
// Comments
// =============================================================================

/// A single `//` or `/* */` comment, markers included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Comment {
    pub text: String,
    /// Position of the leading slash.
    pub slash: Pos,
}

impl Comment {
    pub fn new(text: impl Into<String>, slash: Pos) -> Self {
        Self {
            text: text.into(),
            slash,
        }
    }

    /// Builds a `// body` line comment.
    pub fn line(body: &str, slash: Pos) -> Self {
        Self::new(format!("// {}", body.trim_end()), slash)
    }

    /// End offset of the comment in the source it was parsed from.
    pub fn end(&self) -> u32 {
        self.slash.0 + self.text.len() as u32
    }

    pub fn is_line(&self) -> bool {
        self.text.starts_with("//")
    }

    /// Compiler directive such as `//go:generate` or `//line`.
    pub fn is_directive(&self) -> bool {
        self.text
            .strip_prefix("//")
            .is_some_and(is_directive_body)
    }

    /// Comment content with the markers removed.
    fn body(&self) -> &str {
        if let Some(rest) = self.text.strip_prefix("//") {
            rest.strip_prefix(' ').unwrap_or(rest)
        } else {
            self.text
                .strip_prefix("/*")
                .and_then(|rest| rest.strip_suffix("*/"))
                .unwrap_or(&self.text)
        }
    }
}

fn is_directive_body(body: &str) -> bool {
    if body.starts_with("line ") || body.starts_with("extern ") || body.starts_with("export ") {
        return true;
    }
    // //[a-z0-9]+:[a-z0-9]
    let bytes = body.as_bytes();
    let Some(colon) = body.find(':') else {
        return false;
    };
    if colon == 0 || colon + 1 >= bytes.len() {
        return false;
    }
    (0..=colon + 1)
        .filter(|&i| i != colon)
        .all(|i| bytes[i].is_ascii_lowercase() || bytes[i].is_ascii_digit())
}

/// Sequence of comments with no blank line or code between them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CommentGroup {
    pub list: Vec<Comment>,
}

impl CommentGroup {
    pub fn new(list: Vec<Comment>) -> Self {
        Self { list }
    }

    /// Group holding one `// body` comment.
    pub fn single_line(body: &str, slash: Pos) -> Self {
        Self::new(vec![Comment::line(body, slash)])
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Position of the first comment.
    pub fn pos(&self) -> Option<Pos> {
        self.list.first().map(|c| c.slash)
    }

    /// Compiler directives held by the group, in order.
    pub fn directives(&self) -> impl Iterator<Item = &Comment> {
        self.list.iter().filter(|c| c.is_directive())
    }

    /// Documentation text with markers and directives stripped.
    ///
    /// Leading and trailing blank lines are dropped, so a group made only of
    /// directives or empty comments yields an empty string.
    pub fn text(&self) -> String {
        let mut lines: Vec<&str> = Vec::new();
        for comment in &self.list {
            if comment.is_directive() {
                continue;
            }
            lines.extend(comment.body().lines().map(str::trim_end));
        }
        while lines.first().is_some_and(|l| l.trim().is_empty()) {
            lines.remove(0);
        }
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        lines.join("\n")
    }

    /// `true` when the group carries documentation text.
    pub fn has_text(&self) -> bool {
        !self.text().is_empty()
    }
}

/// Text of an optional doc group, empty when absent.
pub fn doc_text(doc: Option<&CommentGroup>) -> String {
    doc.map(CommentGroup::text).unwrap_or_default()
}

/// Where a node's doc comment lives in the source it was parsed from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leading {
    /// Source range holding the original doc, or an empty insertion point.
    pub span: Span,
    /// The doc the parser attached to the node.
    pub original: Option<CommentGroup>,
    /// Whitespace that precedes the node on its line.
    pub indent: String,
    /// The node does not start its own line; a rendered doc must break first.
    pub break_before: bool,
}

impl Leading {
    /// Insertion point with no original doc.
    pub fn at(offset: usize, indent: impl Into<String>) -> Self {
        Self {
            span: Span::empty(offset),
            original: None,
            indent: indent.into(),
            break_before: false,
        }
    }
}

// =============================================================================
// Declarations
// =============================================================================

/// Top-level node.
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Func(FuncDecl),
    Gen(GenDecl),
    Other(OtherDecl),
}

impl Decl {
    pub fn span(&self) -> Span {
        match self {
            Decl::Func(func) => func.span,
            Decl::Gen(gen_decl) => gen_decl.span,
            Decl::Other(other) => other.span,
        }
    }
}

/// Function or method declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub name: Ident,
    /// Receiver source text for methods, e.g. `(s *Server)`.
    pub receiver: Option<String>,
    pub doc: Option<CommentGroup>,
    pub leading: Leading,
    pub span: Span,
}

impl FuncDecl {
    /// Position of the `func` keyword.
    pub fn pos(&self) -> Pos {
        self.span.pos()
    }

    pub fn is_method(&self) -> bool {
        self.receiver.is_some()
    }
}

/// Keyword of a general declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenKind {
    Import,
    Const,
    Type,
    Var,
}

impl GenKind {
    pub fn keyword(self) -> &'static str {
        match self {
            GenKind::Import => "import",
            GenKind::Const => "const",
            GenKind::Type => "type",
            GenKind::Var => "var",
        }
    }
}

impl fmt::Display for GenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// `import`, `const`, `type` or `var` declaration, grouped or not.
#[derive(Debug, Clone, PartialEq)]
pub struct GenDecl {
    pub kind: GenKind,
    pub doc: Option<CommentGroup>,
    pub leading: Leading,
    pub specs: Vec<Spec>,
    /// `type ( ... )` form.
    pub parenthesized: bool,
    pub span: Span,
}

impl GenDecl {
    /// Position of the keyword.
    pub fn pos(&self) -> Pos {
        self.span.pos()
    }
}

/// One entry of a [`GenDecl`].
#[derive(Debug, Clone, PartialEq)]
pub enum Spec {
    Type(TypeSpec),
    Value(ValueSpec),
    Import(ImportSpec),
}

impl Spec {
    pub fn span(&self) -> Span {
        match self {
            Spec::Type(spec) => spec.span,
            Spec::Value(spec) => spec.span,
            Spec::Import(spec) => spec.span,
        }
    }

    pub fn doc(&self) -> Option<&CommentGroup> {
        match self {
            Spec::Type(spec) => spec.doc.as_ref(),
            Spec::Value(spec) => spec.doc.as_ref(),
            Spec::Import(spec) => spec.doc.as_ref(),
        }
    }

    pub fn doc_mut(&mut self) -> &mut Option<CommentGroup> {
        match self {
            Spec::Type(spec) => &mut spec.doc,
            Spec::Value(spec) => &mut spec.doc,
            Spec::Import(spec) => &mut spec.doc,
        }
    }

    pub fn leading(&self) -> &Leading {
        match self {
            Spec::Type(spec) => &spec.leading,
            Spec::Value(spec) => &spec.leading,
            Spec::Import(spec) => &spec.leading,
        }
    }

    /// Name used in logs and reports.
    pub fn label(&self) -> &str {
        match self {
            Spec::Type(spec) => &spec.name.name,
            Spec::Value(spec) => spec.names.first().map_or("_", |n| n.name.as_str()),
            Spec::Import(spec) => &spec.path,
        }
    }
}

/// `Name [TypeParams] Type` or `Name = Type`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub name: Ident,
    pub alias: bool,
    pub doc: Option<CommentGroup>,
    pub leading: Leading,
    pub span: Span,
}

/// `a, b T = x, y` inside a `const` or `var` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSpec {
    pub names: Vec<Ident>,
    pub doc: Option<CommentGroup>,
    pub leading: Leading,
    pub span: Span,
}

/// Import path, quotes included.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSpec {
    pub path: String,
    pub doc: Option<CommentGroup>,
    pub leading: Leading,
    pub span: Span,
}

/// Package clause or anything the tree does not model.
#[derive(Debug, Clone, PartialEq)]
pub struct OtherDecl {
    pub kind: String,
    pub span: Span,
}

// =============================================================================
// Tree
// =============================================================================

/// Borrowed view of one place a doc comment can be rendered.
#[derive(Debug, Clone, Copy)]
pub struct DocSlot<'t> {
    pub label: &'t str,
    pub doc: Option<&'t CommentGroup>,
    pub leading: &'t Leading,
}

/// Parsed file: top-level declarations plus the flat comment list the printer
/// renders docs from.
#[derive(Debug, Clone, Default)]
pub struct SyntaxTree {
    pub path: PathBuf,
    /// Text the tree was parsed from; positions index into it.
    pub source: String,
    pub package: Option<Ident>,
    pub decls: Vec<Decl>,
    /// Every comment group the printer may emit, sorted by position.
    pub comments: Vec<CommentGroup>,
    /// Groups not attached to any declaration as doc.
    pub floating: Vec<CommentGroup>,
}

impl SyntaxTree {
    pub fn new(path: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
            ..Self::default()
        }
    }

    /// Every doc slot in document order; a group precedes its specs.
    pub fn doc_slots(&self) -> Vec<DocSlot<'_>> {
        let mut slots = Vec::new();
        for decl in &self.decls {
            match decl {
                Decl::Func(func) => slots.push(DocSlot {
                    label: &func.name.name,
                    doc: func.doc.as_ref(),
                    leading: &func.leading,
                }),
                Decl::Gen(gen_decl) => {
                    slots.push(DocSlot {
                        label: gen_decl.kind.keyword(),
                        doc: gen_decl.doc.as_ref(),
                        leading: &gen_decl.leading,
                    });
                    for spec in &gen_decl.specs {
                        slots.push(DocSlot {
                            label: spec.label(),
                            doc: spec.doc(),
                            leading: spec.leading(),
                        });
                    }
                }
                Decl::Other(_) => {}
            }
        }
        slots
    }

    /// Re-scans the tree for every comment group it currently holds: floating
    /// groups plus every non-empty doc, sorted by position.
    pub fn collect_comment_groups(&self) -> Vec<CommentGroup> {
        let mut groups: Vec<CommentGroup> = self.floating.clone();
        groups.extend(
            self.doc_slots()
                .into_iter()
                .filter_map(|slot| slot.doc)
                .filter(|doc| !doc.is_empty())
                .cloned(),
        );
        groups.sort_by_key(|group| group.pos());
        groups.dedup();
        groups
    }

    /// Replaces [`SyntaxTree::comments`] with a fresh scan.
    pub fn refresh_comments(&mut self) {
        self.comments = self.collect_comment_groups();
    }

    /// Looks up a top-level function by name.
    pub fn func(&self, name: &str) -> Option<&FuncDecl> {
        self.decls.iter().find_map(|decl| match decl {
            Decl::Func(func) if func.name.name == name => Some(func),
            _ => None,
        })
    }

    /// Iterates over general declarations of the given kind.
    pub fn gen_decls(&self, kind: GenKind) -> impl Iterator<Item = &GenDecl> {
        self.decls.iter().filter_map(move |decl| match decl {
            Decl::Gen(gen_decl) if gen_decl.kind == kind => Some(gen_decl),
            _ => None,
        })
    }
}
