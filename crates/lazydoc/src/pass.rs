//! One synthesis pass over a parsed file.

use lazydoc_syntax::SyntaxTree;
use tracing::debug;

use crate::classify::{Classification, classify};
use crate::ledger::VisitLedger;
use crate::options::CommentOptions;
use crate::report::FileStage;
use crate::synthesize::{CommentSynthesizer, SynthesisReport};

/// Classifies, records and synthesizes docs for every top-level declaration
/// of `tree`, then recollects its comment list so the printer sees the new
/// groups.
///
/// Each call starts from a fresh [`VisitLedger`]; identity keys are only
/// compared within one file.
pub fn annotate_tree(tree: &mut SyntaxTree, options: &CommentOptions) -> SynthesisReport {
    let plan = classify(tree);

    let mut ledger = VisitLedger::new();
    for candidate in plan.iter().flat_map(Classification::candidates) {
        ledger.record(&candidate.key);
    }
    debug!(
        path = %tree.path.display(),
        stage = %FileStage::Classified,
        decls = plan.len(),
        identities = ledger.len()
    );

    let report = CommentSynthesizer::new(options).apply(tree, &plan, &ledger);
    tree.refresh_comments();
    report
}
