//! Serializer that splices doc comments back into the original source
//!
//! Only doc slots whose comment group changed are rewritten; every other byte
//! is copied from [`SyntaxTree::source`], so bodies, signatures and free
//! comments survive untouched.

use tracing::trace;

use crate::ast::{CommentGroup, Leading, SyntaxTree};
use crate::error::{FormatError, FormatResult};
use crate::format::FormatOptions;
use crate::pos::Span;

/// Renders a [`SyntaxTree`] back to source text.
pub trait SourceFormatter {
    fn format(&self, tree: &SyntaxTree) -> FormatResult<String>;
}

impl<T: SourceFormatter + ?Sized> SourceFormatter for &T {
    fn format(&self, tree: &SyntaxTree) -> FormatResult<String> {
        (**self).format(tree)
    }
}

/// Printer for trees produced by [`GoParser`](crate::GoParser).
#[derive(Debug, Clone, Default)]
pub struct GoPrinter {
    options: FormatOptions,
}

#[derive(Debug)]
struct Edit {
    span: Span,
    text: String,
}

impl GoPrinter {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    fn collect_edits(&self, tree: &SyntaxTree) -> FormatResult<Vec<Edit>> {
        let mut edits = Vec::new();
        for slot in tree.doc_slots() {
            let current = slot.doc.filter(|doc| !doc.is_empty());
            if let Some(doc) = current {
                if self.options.check_comment_list && !tree.comments.contains(doc) {
                    return Err(FormatError::DanglingComment {
                        name: slot.label.to_string(),
                        pos: doc.pos().map_or(0, |p| p.0),
                    });
                }
            }

            let original = slot.leading.original.as_ref().filter(|doc| !doc.is_empty());
            if current == original {
                continue;
            }

            trace!(name = slot.label, "rewriting doc slot");
            edits.push(Edit {
                span: slot.leading.span,
                text: render_doc(current, slot.leading),
            });
        }
        Ok(edits)
    }
}

impl SourceFormatter for GoPrinter {
    fn format(&self, tree: &SyntaxTree) -> FormatResult<String> {
        let mut edits = self.collect_edits(tree)?;
        edits.sort_by_key(|edit| (edit.span.start, edit.span.end));

        let source = tree.source.as_str();
        for edit in &edits {
            let (start, end) = (edit.span.start as usize, edit.span.end as usize);
            if end > source.len()
                || !source.is_char_boundary(start)
                || !source.is_char_boundary(end)
            {
                return Err(FormatError::SpanOutOfRange {
                    start: edit.span.start,
                    end: edit.span.end,
                    len: source.len(),
                });
            }
        }
        for pair in edits.windows(2) {
            if pair[0].span.overlaps(&pair[1].span) {
                return Err(FormatError::OverlappingEdits {
                    first: pair[0].span.start,
                    second: pair[1].span.start,
                });
            }
        }

        let extra: usize = edits.iter().map(|edit| edit.text.len()).sum();
        let mut out = String::with_capacity(source.len() + extra);
        let mut cursor = 0usize;
        for edit in &edits {
            out.push_str(&source[cursor..edit.span.start as usize]);
            out.push_str(&edit.text);
            cursor = edit.span.end as usize;
        }
        out.push_str(&source[cursor..]);

        if self.options.unix_line_endings && out.contains('\r') {
            out = out.replace("\r\n", "\n");
        }
        if self.options.final_newline {
            out.truncate(out.trim_end().len());
            out.push('\n');
        }
        Ok(out)
    }
}

/// Doc text for one slot: one comment per line at the node's indentation.
fn render_doc(doc: Option<&CommentGroup>, leading: &Leading) -> String {
    let Some(doc) = doc else {
        return String::new();
    };
    let mut text = String::new();
    if leading.break_before {
        text.push('\n');
    }
    for comment in &doc.list {
        text.push_str(&leading.indent);
        text.push_str(&comment.text);
        text.push('\n');
    }
    if leading.break_before {
        text.push_str(&leading.indent);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Decl, Spec, doc_text};
    use crate::parser::{GoParser, SourceParser};
    use crate::pos::Pos;
    use std::path::Path;

    fn parse(source: &str) -> SyntaxTree {
        GoParser.parse(Path::new("p.go"), source).unwrap()
    }

    fn func_mut<'t>(tree: &'t mut SyntaxTree, name: &str) -> &'t mut crate::ast::FuncDecl {
        tree.decls
            .iter_mut()
            .find_map(|decl| match decl {
                Decl::Func(func) if func.name.name == name => Some(func),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn untouched_tree_prints_source() {
        let source = "package p\n\n// Foo doc\nfunc Foo() {\n\t// body\n}\n\nvar (\n\tA = 1 // a\n)\n";
        let tree = parse(source);
        assert_eq!(GoPrinter::default().format(&tree).unwrap(), source);
    }

    #[test]
    fn inserts_new_doc_above_declaration() {
        let mut tree = parse("package p\n\nfunc Foo() {}\n");
        let foo = func_mut(&mut tree, "Foo");
        foo.doc = Some(CommentGroup::single_line("Foo does a thing", Pos(foo.pos().0 - 1)));
        tree.refresh_comments();
        assert_eq!(
            GoPrinter::default().format(&tree).unwrap(),
            "package p\n\n// Foo does a thing\nfunc Foo() {}\n"
        );
    }

    #[test]
    fn replaces_and_removes_existing_docs() {
        let mut tree =
            parse("package p\n\n// old\n// text\nfunc Foo() {}\n\n// Bar doc\nfunc Bar() {}\n");
        func_mut(&mut tree, "Foo").doc = Some(CommentGroup::single_line("new", Pos(10)));
        func_mut(&mut tree, "Bar").doc = Some(CommentGroup::default());
        tree.refresh_comments();
        assert_eq!(
            GoPrinter::default().format(&tree).unwrap(),
            "package p\n\n// new\nfunc Foo() {}\n\nfunc Bar() {}\n"
        );
    }

    #[test]
    fn grouped_spec_docs_are_indented() {
        let mut tree = parse("package p\n\nconst (\n\tA = 1\n\tB = 2\n)\n");
        let Decl::Gen(group) = &mut tree.decls[1] else {
            panic!("expected const group");
        };
        let Spec::Value(b) = &mut group.specs[1] else {
            panic!("expected value spec");
        };
        b.doc = Some(CommentGroup::single_line("B is two", Pos(b.span.start - 1)));
        tree.refresh_comments();
        assert_eq!(
            GoPrinter::default().format(&tree).unwrap(),
            "package p\n\nconst (\n\tA = 1\n\t// B is two\n\tB = 2\n)\n"
        );
    }

    #[test]
    fn breaks_line_for_mid_line_declarations() {
        let mut tree = parse("package p\n\nvar a = 1; func Foo() {}\n");
        let foo = func_mut(&mut tree, "Foo");
        foo.doc = Some(CommentGroup::single_line("Foo x", Pos(foo.pos().0 - 1)));
        tree.refresh_comments();
        assert_eq!(
            GoPrinter::default().format(&tree).unwrap(),
            "package p\n\nvar a = 1;\n// Foo x\nfunc Foo() {}\n"
        );
    }

    #[test]
    fn crlf_source_is_printed_with_unix_line_endings() {
        let source = "package p\r\n\r\n// Bar doc\r\nfunc Bar() {}\r\n\r\nfunc Foo() {}\r\n";
        let mut tree = parse(source);
        assert_eq!(doc_text(func_mut(&mut tree, "Bar").doc.as_ref()), "Bar doc");

        let foo = func_mut(&mut tree, "Foo");
        foo.doc = Some(CommentGroup::single_line("Foo todo", Pos(foo.pos().0 - 1)));
        tree.refresh_comments();

        assert_eq!(
            GoPrinter::default().format(&tree).unwrap(),
            "package p\n\n// Bar doc\nfunc Bar() {}\n\n// Foo todo\nfunc Foo() {}\n"
        );
        assert_eq!(
            GoPrinter::new(FormatOptions::verbatim()).format(&parse(source)).unwrap(),
            source
        );
    }

    #[test]
    fn block_comment_before_declaration_keeps_no_trailing_blank() {
        let mut tree = parse("package p\n\n/* x */ func Foo() {}\n");
        let foo = func_mut(&mut tree, "Foo");
        foo.doc = Some(CommentGroup::single_line("Foo todo", Pos(foo.pos().0 - 1)));
        tree.refresh_comments();
        assert_eq!(
            GoPrinter::default().format(&tree).unwrap(),
            "package p\n\n/* x */\n// Foo todo\nfunc Foo() {}\n"
        );
    }

    #[test]
    fn unregistered_doc_is_rejected() {
        let mut tree = parse("package p\n\nfunc Foo() {}\n");
        func_mut(&mut tree, "Foo").doc = Some(CommentGroup::single_line("Foo x", Pos(10)));
        let err = GoPrinter::default().format(&tree).unwrap_err();
        assert!(matches!(err, FormatError::DanglingComment { ref name, .. } if name == "Foo"));
    }

    #[test]
    fn final_newline_is_normalised() {
        let tree = parse("package p\n\nfunc foo() {}\n\n\n");
        assert_eq!(
            GoPrinter::default().format(&tree).unwrap(),
            "package p\n\nfunc foo() {}\n"
        );
        assert_eq!(
            GoPrinter::new(FormatOptions::verbatim()).format(&tree).unwrap(),
            "package p\n\nfunc foo() {}\n\n\n"
        );
    }
}
