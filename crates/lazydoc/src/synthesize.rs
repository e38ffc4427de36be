//! Attaches default doc comments to qualifying declarations.

use lazydoc_syntax::{CommentGroup, Decl, Spec, SyntaxTree};
use tracing::{debug, trace};

use crate::classify::{Candidate, Classification, Target};
use crate::ledger::{IdentityKey, VisitLedger};
use crate::options::CommentOptions;

/// What the synthesizer did with each candidate it considered.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SynthesisReport {
    /// Identities that received a default comment.
    pub synthesized: Vec<IdentityKey>,
    /// Identities over the visit threshold whose doc was cleared instead.
    pub cleared: Vec<IdentityKey>,
    /// Qualifying identities left alone because they carry their own doc.
    pub preserved: Vec<IdentityKey>,
}

impl SynthesisReport {
    /// `true` when the tree was not changed.
    pub fn is_unchanged(&self) -> bool {
        self.synthesized.is_empty() && self.cleared.is_empty()
    }
}

/// Writes `// <name> <default text>` docs into a [`SyntaxTree`].
#[derive(Debug, Clone)]
pub struct CommentSynthesizer<'o> {
    options: &'o CommentOptions,
}

impl<'o> CommentSynthesizer<'o> {
    pub fn new(options: &'o CommentOptions) -> Self {
        Self { options }
    }

    /// Mutates `tree` according to `plan`.
    ///
    /// Only qualifying candidates are touched, and never one that already
    /// carries doc text. Compiler directives found in a text-less doc are kept
    /// below the synthesized line.
    pub fn apply(
        &self,
        tree: &mut SyntaxTree,
        plan: &[Classification],
        ledger: &VisitLedger,
    ) -> SynthesisReport {
        let mut report = SynthesisReport::default();

        for candidate in plan.iter().flat_map(Classification::candidates) {
            if !candidate.qualifies {
                continue;
            }
            let Some(doc) = doc_slot_mut(tree, candidate.target) else {
                continue;
            };
            self.apply_one(doc, candidate, ledger, &mut report);
        }

        debug!(
            synthesized = report.synthesized.len(),
            cleared = report.cleared.len(),
            preserved = report.preserved.len(),
            "comment synthesis finished"
        );
        report
    }

    fn apply_one(
        &self,
        doc: &mut Option<CommentGroup>,
        candidate: &Candidate,
        ledger: &VisitLedger,
        report: &mut SynthesisReport,
    ) {
        if doc.as_ref().is_some_and(CommentGroup::has_text) {
            report.preserved.push(candidate.key.clone());
            return;
        }

        let directives: Vec<_> = doc
            .as_ref()
            .map(|old| old.directives().cloned().collect())
            .unwrap_or_default();

        if ledger.is_over_threshold(&candidate.key) {
            debug!(
                key = %candidate.key,
                visits = ledger.count(&candidate.key),
                "visit threshold exceeded; clearing doc"
            );
            *doc = Some(CommentGroup::new(directives));
            report.cleared.push(candidate.key.clone());
            return;
        }

        let mut group =
            CommentGroup::single_line(&self.options.render(candidate.name()), candidate.slash);
        group.list.extend(directives);
        trace!(key = %candidate.key, "synthesized doc");
        *doc = Some(group);
        report.synthesized.push(candidate.key.clone());
    }
}

/// Doc a candidate's comment is written to. A spec outside parentheses shares
/// the declaration's doc, so directives already there stay below the new line
/// just as they do for functions.
fn doc_slot_mut(tree: &mut SyntaxTree, target: Target) -> Option<&mut Option<CommentGroup>> {
    match target {
        Target::Func { decl } => match tree.decls.get_mut(decl)? {
            Decl::Func(func) => Some(&mut func.doc),
            _ => None,
        },
        Target::Spec { decl, spec } => match tree.decls.get_mut(decl)? {
            Decl::Gen(gen_decl) => {
                if !gen_decl.parenthesized {
                    Some(&mut gen_decl.doc)
                } else {
                    gen_decl.specs.get_mut(spec).map(Spec::doc_mut)
                }
            }
            _ => None,
        },
    }
}
