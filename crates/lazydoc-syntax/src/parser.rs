//! Parser façade for reading Go source files
//!
//! [`GoParser`] drives tree-sitter's Go grammar and lowers the concrete tree
//! into the [`SyntaxTree`] model: top-level declarations, their doc comments
//! and the file's comment groups, grouped the way `go/parser` groups them.

use std::path::Path;

use rustc_hash::FxHashSet;
use tracing::{debug, trace};
use tree_sitter::{Node, Parser};

use crate::ast::{
    Comment, CommentGroup, Decl, FuncDecl, GenDecl, GenKind, Ident, ImportSpec, Leading, OtherDecl,
    Spec, SyntaxTree, TypeSpec, ValueSpec,
};
use crate::error::{ParseError, ParseResult};
use crate::pos::{LineIndex, Pos, Span};

/// Turns source text into a [`SyntaxTree`].
pub trait SourceParser {
    /// Parse one file. `path` is carried into the tree and into errors.
    fn parse(&self, path: &Path, source: &str) -> ParseResult<SyntaxTree>;
}

impl<T: SourceParser + ?Sized> SourceParser for &T {
    fn parse(&self, path: &Path, source: &str) -> ParseResult<SyntaxTree> {
        (**self).parse(path, source)
    }
}

/// tree-sitter backed Go parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoParser;

impl GoParser {
    pub fn new() -> Self {
        Self
    }
}

impl SourceParser for GoParser {
    fn parse(&self, path: &Path, source: &str) -> ParseResult<SyntaxTree> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| ParseError::Unavailable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let ts_tree = parser
            .parse(source, None)
            .ok_or_else(|| ParseError::Unavailable {
                path: path.to_path_buf(),
                reason: "tree-sitter returned no tree".to_string(),
            })?;

        let root = ts_tree.root_node();
        let index = LineIndex::new(source);

        if root.has_error() {
            let node = first_error(root).unwrap_or(root);
            let at = index.position(node.start_byte() as u32);
            let message = if node.is_missing() {
                format!("missing {}", node.kind())
            } else {
                let snippet = &source[node.start_byte()..node.end_byte()];
                let snippet = snippet.lines().next().unwrap_or_default();
                format!("unexpected `{}`", snippet.trim())
            };
            debug!(path = %path.display(), %at, "go source rejected");
            return Err(ParseError::syntax(path, at.line, at.column, message));
        }

        let tree = Lowering::new(source, &index).lower(path, root);
        trace!(
            path = %path.display(),
            decls = tree.decls.len(),
            comments = tree.comments.len(),
            "parsed go source"
        );
        Ok(tree)
    }
}

fn first_error<'t>(node: Node<'t>) -> Option<Node<'t>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error).or(Some(node))
}

/// Comment group as seen in the source, before attachment.
struct RawGroup {
    group: CommentGroup,
    start: usize,
    end: usize,
    /// First comment shares its line with code.
    trailing: bool,
}

struct Lowering<'s, 'i> {
    source: &'s str,
    index: &'i LineIndex<'s>,
    groups: Vec<RawGroup>,
    attached: FxHashSet<usize>,
}

impl<'s, 'i> Lowering<'s, 'i> {
    fn new(source: &'s str, index: &'i LineIndex<'s>) -> Self {
        Self {
            source,
            index,
            groups: Vec::new(),
            attached: FxHashSet::default(),
        }
    }

    fn lower(mut self, path: &Path, root: Node<'_>) -> SyntaxTree {
        let mut comments = Vec::new();
        collect_comments(root, &mut comments);
        self.group_comments(&comments);

        let mut tree = SyntaxTree::new(path, self.source);
        let mut cursor = root.walk();
        let children: Vec<Node<'_>> = root.named_children(&mut cursor).collect();

        for node in children {
            match node.kind() {
                "comment" => {}
                "package_clause" => {
                    let mut inner = node.walk();
                    tree.package = node
                        .named_children(&mut inner)
                        .find(|n| n.kind() == "package_identifier")
                        .map(|n| self.ident(n));
                    tree.decls.push(self.other(node));
                }
                "function_declaration" | "method_declaration" => {
                    if let Some(func) = self.func_decl(node) {
                        tree.decls.push(Decl::Func(func));
                    } else {
                        tree.decls.push(self.other(node));
                    }
                }
                "import_declaration" => {
                    tree.decls.push(Decl::Gen(self.gen_decl(node, GenKind::Import)))
                }
                "const_declaration" => {
                    tree.decls.push(Decl::Gen(self.gen_decl(node, GenKind::Const)))
                }
                "type_declaration" => {
                    tree.decls.push(Decl::Gen(self.gen_decl(node, GenKind::Type)))
                }
                "var_declaration" => tree.decls.push(Decl::Gen(self.gen_decl(node, GenKind::Var))),
                _ => tree.decls.push(self.other(node)),
            }
        }

        tree.floating = self
            .groups
            .iter()
            .enumerate()
            .filter(|(idx, _)| !self.attached.contains(idx))
            .map(|(_, raw)| raw.group.clone())
            .collect();
        tree.refresh_comments();
        tree
    }

    fn text(&self, node: Node<'_>) -> &'s str {
        &self.source[node.start_byte()..node.end_byte()]
    }

    fn ident(&self, node: Node<'_>) -> Ident {
        Ident::new(self.text(node), Pos::new(node.start_byte()))
    }

    fn span(node: Node<'_>) -> Span {
        Span::new(node.start_byte(), node.end_byte())
    }

    fn other(&self, node: Node<'_>) -> Decl {
        Decl::Other(OtherDecl {
            kind: node.kind().to_string(),
            span: Self::span(node),
        })
    }

    /// Splits the file's comments into groups: a blank line or any code ends a
    /// group, and a comment trailing code only groups with comments on its line.
    fn group_comments(&mut self, comments: &[Node<'_>]) {
        for node in comments {
            let start = node.start_byte();
            let end = node.end_byte();
            let text = self.text(*node).trim_end_matches('\r');
            let comment = Comment::new(text, Pos::new(start));

            if let Some(current) = self.groups.last_mut() {
                let between = &self.source[current.end..start];
                let newlines = between.matches('\n').count();
                let joins = between.trim().is_empty()
                    && newlines <= 1
                    && !(current.trailing && newlines > 0);
                if joins {
                    current.group.list.push(comment);
                    current.end = end;
                    continue;
                }
            }

            let trailing = !self.index.line_prefix(start as u32).trim().is_empty();
            self.groups.push(RawGroup {
                group: CommentGroup::new(vec![comment]),
                start,
                end,
                trailing,
            });
        }
    }

    /// Where a doc for a node starting at `start` goes, and the doc group the
    /// source already has there, if any.
    fn leading_for(&mut self, start: usize) -> Leading {
        let prefix = self.index.line_prefix(start as u32);
        let indent: String = prefix.chars().take_while(|c| c.is_whitespace()).collect();

        if !prefix.trim().is_empty() {
            // the line break replaces the blanks between the code and the node
            let blanks = prefix.len() - prefix.trim_end().len();
            return Leading {
                span: Span::new(start - blanks, start),
                original: None,
                indent,
                break_before: true,
            };
        }

        let anchor = start - prefix.len();
        let mut leading = Leading::at(anchor, indent);

        let candidate = self.groups.partition_point(|g| g.end <= start);
        if candidate == 0 || self.attached.contains(&(candidate - 1)) {
            return leading;
        }
        let raw = &self.groups[candidate - 1];
        let between = &self.source[raw.end..start];
        if raw.trailing || !between.trim().is_empty() || between.matches('\n').count() != 1 {
            return leading;
        }

        let doc_start = self.index.line_start(raw.start as u32) as usize;
        leading.span = Span::new(doc_start, anchor);
        leading.original = Some(raw.group.clone());
        self.attached.insert(candidate - 1);
        leading
    }

    fn func_decl(&mut self, node: Node<'_>) -> Option<FuncDecl> {
        let name = node.child_by_field_name("name")?;
        let receiver = node
            .child_by_field_name("receiver")
            .map(|r| self.text(r).to_string());
        let leading = self.leading_for(node.start_byte());
        Some(FuncDecl {
            name: self.ident(name),
            receiver,
            doc: leading.original.clone(),
            leading,
            span: Self::span(node),
        })
    }

    fn gen_decl(&mut self, node: Node<'_>, kind: GenKind) -> GenDecl {
        let leading = self.leading_for(node.start_byte());
        let parenthesized = has_paren(node);

        let mut spec_nodes = Vec::new();
        collect_specs(node, &mut spec_nodes);

        let specs = spec_nodes
            .into_iter()
            .filter_map(|spec| {
                let spec_leading = if parenthesized {
                    self.leading_for(spec.start_byte())
                } else {
                    // The lone spec shares the keyword's insertion point; any doc
                    // above the keyword belongs to the group.
                    Leading {
                        span: Span::empty(leading.span.end as usize),
                        original: None,
                        indent: leading.indent.clone(),
                        break_before: leading.break_before,
                    }
                };
                self.spec(spec, spec_leading)
            })
            .collect();

        GenDecl {
            kind,
            doc: leading.original.clone(),
            leading,
            specs,
            parenthesized,
            span: Self::span(node),
        }
    }

    fn spec(&self, node: Node<'_>, leading: Leading) -> Option<Spec> {
        let doc = leading.original.clone();
        let span = Self::span(node);
        match node.kind() {
            "type_spec" | "type_alias" => {
                let name = node.child_by_field_name("name")?;
                Some(Spec::Type(TypeSpec {
                    name: self.ident(name),
                    alias: node.kind() == "type_alias",
                    doc,
                    leading,
                    span,
                }))
            }
            "const_spec" | "var_spec" => {
                let mut cursor = node.walk();
                let names = node
                    .children_by_field_name("name", &mut cursor)
                    .map(|n| self.ident(n))
                    .collect();
                Some(Spec::Value(ValueSpec {
                    names,
                    doc,
                    leading,
                    span,
                }))
            }
            "import_spec" => {
                let path = node.child_by_field_name("path")?;
                Some(Spec::Import(ImportSpec {
                    path: self.text(path).to_string(),
                    doc,
                    leading,
                    span,
                }))
            }
            _ => None,
        }
    }
}

fn collect_comments<'t>(node: Node<'t>, out: &mut Vec<Node<'t>>) {
    if node.kind() == "comment" {
        out.push(node);
        return;
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
    for child in children {
        collect_comments(child, out);
    }
}

const SPEC_KINDS: &[&str] = &["type_spec", "type_alias", "const_spec", "var_spec", "import_spec"];

/// Spec nodes of a declaration, looking through `*_list` wrappers.
fn collect_specs<'t>(node: Node<'t>, out: &mut Vec<Node<'t>>) {
    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.named_children(&mut cursor).collect();
    for child in children {
        if SPEC_KINDS.contains(&child.kind()) {
            out.push(child);
        } else if child.kind().ends_with("_list") {
            collect_specs(child, out);
        }
    }
}

fn has_paren(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().any(|child| {
        child.kind() == "(" || (child.kind().ends_with("_list") && has_paren(child))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::doc_text;

    fn parse(source: &str) -> SyntaxTree {
        GoParser
            .parse(Path::new("test.go"), source)
            .expect("source should parse")
    }

    #[test]
    fn lowers_top_level_declarations() {
        let tree = parse(
            "package demo\n\nimport \"fmt\"\n\nfunc Foo() {}\n\nfunc (s *S) Bar() {}\n\ntype S struct{}\n\nvar x = 1\n",
        );
        assert_eq!(tree.package.as_ref().map(|p| p.name.as_str()), Some("demo"));

        let names: Vec<_> = tree
            .decls
            .iter()
            .map(|decl| match decl {
                Decl::Func(func) => func.name.name.clone(),
                Decl::Gen(gen_decl) => gen_decl.kind.keyword().to_string(),
                Decl::Other(other) => other.kind.clone(),
            })
            .collect();
        assert_eq!(names, ["package_clause", "import", "Foo", "Bar", "type", "var"]);

        let bar = tree.func("Bar").unwrap();
        assert_eq!(bar.receiver.as_deref(), Some("(s *S)"));
        assert!(bar.is_method());
    }

    #[test]
    fn attaches_doc_on_previous_line() {
        let tree = parse("package demo\n\n// Foo does things.\n// More.\nfunc Foo() {}\n");
        let foo = tree.func("Foo").unwrap();
        assert_eq!(doc_text(foo.doc.as_ref()), "Foo does things.\nMore.");
        assert_eq!(foo.doc.as_ref().map(|d| d.list.len()), Some(2));
        assert!(tree.floating.is_empty());
        assert_eq!(tree.comments.len(), 1);
    }

    #[test]
    fn blank_line_detaches_comment() {
        let tree = parse("package demo\n\n// Stray note.\n\nfunc Foo() {}\n");
        assert!(tree.func("Foo").unwrap().doc.is_none());
        assert_eq!(tree.floating.len(), 1);
    }

    #[test]
    fn trailing_comment_is_not_a_doc() {
        let tree = parse("package demo\n\nvar a = 1 // about a\nfunc Foo() {}\n");
        assert!(tree.func("Foo").unwrap().doc.is_none());
    }

    #[test]
    fn comment_below_trailing_comment_is_a_doc() {
        let tree = parse("package demo\n\nvar a = 1 // about a\n// Foo doc\nfunc Foo() {}\n");
        assert_eq!(doc_text(tree.func("Foo").unwrap().doc.as_ref()), "Foo doc");
    }

    #[test]
    fn grouped_specs_get_their_own_docs() {
        let tree = parse(
            "package demo\n\n// Kinds of things.\ntype (\n\t// A is first.\n\tA int\n\tb string\n)\n",
        );
        let group = tree.gen_decls(GenKind::Type).next().unwrap();
        assert!(group.parenthesized);
        assert_eq!(doc_text(group.doc.as_ref()), "Kinds of things.");
        assert_eq!(group.specs.len(), 2);
        assert_eq!(doc_text(group.specs[0].doc()), "A is first.");
        assert_eq!(group.specs[0].leading().indent, "\t");
        assert!(group.specs[1].doc().is_none());
    }

    #[test]
    fn lone_spec_doc_belongs_to_group() {
        let tree = parse("package demo\n\n// Size doc\ntype Size int\n");
        let group = tree.gen_decls(GenKind::Type).next().unwrap();
        assert!(!group.parenthesized);
        assert_eq!(doc_text(group.doc.as_ref()), "Size doc");
        assert!(group.specs[0].doc().is_none());
        assert_eq!(group.specs[0].leading().span, Span::empty(group.span.start as usize));
    }

    #[test]
    fn value_specs_list_every_name() {
        let tree = parse("package demo\n\nvar (\n\ta, B = 1, 2\n\tc int\n)\n\nconst K = 3\n");
        let vars = tree.gen_decls(GenKind::Var).next().unwrap();
        let Spec::Value(first) = &vars.specs[0] else {
            panic!("expected value spec");
        };
        let names: Vec<_> = first.names.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["a", "B"]);
        assert_eq!(tree.gen_decls(GenKind::Const).count(), 1);
    }

    #[test]
    fn body_comments_stay_floating() {
        let tree = parse("package demo\n\nfunc foo() {\n\t// inside\n\treturn\n}\n");
        assert_eq!(tree.floating.len(), 1);
        assert_eq!(tree.floating[0].list[0].text, "// inside");
    }

    #[test]
    fn reports_syntax_errors_with_position() {
        let err = GoParser
            .parse(Path::new("bad.go"), "package demo\n\nfunc {\n")
            .unwrap_err();
        match err {
            ParseError::Syntax { path, line, .. } => {
                assert_eq!(path, Path::new("bad.go"));
                assert!(line >= 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    // tree-sitter-go wants a terminator before the closing paren of a
    // one-line group, which gofmt never produces but the Go compiler allows.
    #[test]
    fn one_line_group_without_terminator_is_rejected() {
        let err = GoParser
            .parse(Path::new("short.go"), "package demo\n\nvar ( A = 1 )\n")
            .unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));

        let tree = parse("package demo\n\nvar (\n\tA = 1\n)\n");
        assert_eq!(tree.gen_decls(GenKind::Var).count(), 1);
    }
}
