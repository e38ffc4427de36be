//! Decides which top-level declarations get a synthesized doc comment.
//!
//! Qualification rules:
//! - functions and methods: exported and no doc text of their own
//! - type specs: exported and the enclosing group has no doc text
//! - const/var specs: the enclosing group has no doc text, exported or not
//!
//! Type specs consult the group's doc rather than their own. Inside a
//! parenthesized group this means a spec-level doc does not stop a spec from
//! qualifying; the synthesizer still refuses to overwrite it.

use lazydoc_syntax::{Decl, FuncDecl, GenDecl, GenKind, Pos, Spec, SyntaxTree, doc_text};

use crate::ledger::IdentityKey;

/// Where a candidate lives in [`SyntaxTree::decls`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Func { decl: usize },
    Spec { decl: usize, spec: usize },
}

/// A declaration the synthesizer may act on.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub target: Target,
    pub key: IdentityKey,
    pub exported: bool,
    pub qualifies: bool,
    /// Attachment position for a synthesized comment: just before the node.
    pub slash: Pos,
}

impl Candidate {
    pub fn name(&self) -> &str {
        &self.key.name
    }
}

/// Verdict for one top-level node, in document order.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Function(Candidate),
    Types(Vec<Candidate>),
    Values(Vec<Candidate>),
    Other,
}

impl Classification {
    pub fn candidates(&self) -> &[Candidate] {
        match self {
            Classification::Function(candidate) => std::slice::from_ref(candidate),
            Classification::Types(candidates) | Classification::Values(candidates) => {
                candidates.as_slice()
            }
            Classification::Other => &[],
        }
    }
}

/// Classifies every top-level node. Read-only over the tree.
pub fn classify(tree: &SyntaxTree) -> Vec<Classification> {
    tree.decls
        .iter()
        .enumerate()
        .map(|(idx, decl)| match decl {
            Decl::Func(func) => Classification::Function(func_candidate(idx, func)),
            Decl::Gen(gen_decl) => match gen_decl.kind {
                GenKind::Type => Classification::Types(spec_candidates(idx, gen_decl)),
                GenKind::Const | GenKind::Var => {
                    Classification::Values(spec_candidates(idx, gen_decl))
                }
                GenKind::Import => Classification::Other,
            },
            Decl::Other(_) => Classification::Other,
        })
        .collect()
}

fn before(pos: Pos) -> Pos {
    Pos(pos.0.saturating_sub(1))
}

fn func_candidate(decl: usize, func: &FuncDecl) -> Candidate {
    let exported = func.name.is_exported();
    Candidate {
        target: Target::Func { decl },
        key: IdentityKey::new(&func.name.name, func.pos()),
        exported,
        qualifies: exported && doc_text(func.doc.as_ref()).is_empty(),
        slash: before(func.pos()),
    }
}

fn spec_candidates(decl: usize, gen_decl: &GenDecl) -> Vec<Candidate> {
    let group_undocumented = doc_text(gen_decl.doc.as_ref()).is_empty();

    gen_decl
        .specs
        .iter()
        .enumerate()
        .filter_map(|(spec_idx, spec)| {
            let slash = if gen_decl.parenthesized {
                before(spec.span().pos())
            } else {
                before(gen_decl.pos())
            };
            let target = Target::Spec {
                decl,
                spec: spec_idx,
            };
            match spec {
                Spec::Type(type_spec) => {
                    let exported = type_spec.name.is_exported();
                    Some(Candidate {
                        target,
                        key: IdentityKey::new(&type_spec.name.name, type_spec.name.pos),
                        exported,
                        qualifies: exported && group_undocumented,
                        slash,
                    })
                }
                Spec::Value(value_spec) => {
                    // Values are keyed by the group so repeats within one
                    // block share an identity.
                    let first = value_spec.names.first()?;
                    Some(Candidate {
                        target,
                        key: IdentityKey::new(&first.name, gen_decl.pos()),
                        exported: first.is_exported(),
                        qualifies: group_undocumented,
                        slash,
                    })
                }
                Spec::Import(_) => None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazydoc_syntax::{GoParser, SourceParser};
    use std::path::Path;

    fn plan(source: &str) -> Vec<Classification> {
        let tree = GoParser.parse(Path::new("c.go"), source).unwrap();
        classify(&tree)
    }

    fn verdicts(plan: &[Classification]) -> Vec<(String, bool)> {
        plan.iter()
            .flat_map(Classification::candidates)
            .map(|c| (c.name().to_string(), c.qualifies))
            .collect()
    }

    #[test]
    fn functions_need_export_and_no_doc() {
        let plan = plan(
            "package c\n\nfunc Foo() {}\n\nfunc bar() {}\n\n// Baz doc\nfunc Baz() {}\n\nfunc (t T) Method() {}\n",
        );
        assert_eq!(
            verdicts(&plan),
            [
                ("Foo".to_string(), true),
                ("bar".to_string(), false),
                ("Baz".to_string(), false),
                ("Method".to_string(), true),
            ]
        );
        assert!(matches!(plan[0], Classification::Other));
    }

    #[test]
    fn directive_only_doc_counts_as_undocumented() {
        let plan = plan("package c\n\n//go:noinline\nfunc Hot() {}\n");
        assert_eq!(verdicts(&plan), [("Hot".to_string(), true)]);
    }

    #[test]
    fn type_specs_follow_group_doc() {
        let plan = plan(
            "package c\n\n// Grouped types.\ntype (\n\tA int\n)\n\ntype (\n\t// B doc\n\tB int\n\tc int\n)\n\ntype D int\n",
        );
        assert_eq!(
            verdicts(&plan),
            [
                ("A".to_string(), false),
                ("B".to_string(), true),
                ("c".to_string(), false),
                ("D".to_string(), true),
            ]
        );
    }

    #[test]
    fn values_ignore_export_status() {
        let plan = plan(
            "package c\n\nvar count = 0\n\n// Limits doc\nconst (\n\tMax = 1\n)\n\nvar (\n\ta, b = 1, 2\n)\n",
        );
        assert_eq!(
            verdicts(&plan),
            [
                ("count".to_string(), true),
                ("Max".to_string(), false),
                ("a".to_string(), true),
            ]
        );
        let Classification::Values(values) = &plan[1] else {
            panic!("expected values");
        };
        assert!(!values[0].exported);
    }

    #[test]
    fn value_identity_uses_group_position() {
        let source = "package c\n\nvar (\n\tx = 1\n\ty = 2\n)\n";
        let plan = plan(source);
        let group_pos = Pos(source.find("var").unwrap() as u32);
        let keys: Vec<_> = plan
            .iter()
            .flat_map(Classification::candidates)
            .map(|c| c.key.clone())
            .collect();
        assert_eq!(
            keys,
            [IdentityKey::new("x", group_pos), IdentityKey::new("y", group_pos)]
        );
    }

    #[test]
    fn imports_are_not_candidates() {
        let plan = plan("package c\n\nimport \"fmt\"\n\nvar _ = fmt.Sprint\n");
        assert!(matches!(plan[1], Classification::Other));
        assert_eq!(verdicts(&plan), [("_".to_string(), true)]);
    }

    #[test]
    fn slash_sits_before_the_node() {
        let source = "package c\n\nfunc Foo() {}\n";
        let plan = plan(source);
        let Classification::Function(foo) = &plan[1] else {
            panic!("expected function");
        };
        assert_eq!(foo.slash, Pos(source.find("func").unwrap() as u32 - 1));
    }
}
