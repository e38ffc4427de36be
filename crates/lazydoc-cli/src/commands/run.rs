//! Annotates the configured Go file or directory.

use std::io::Write;

use lazydoc::{FileOutcome, LazyCommenter, RunReport};
use tracing::{error, info};

use crate::config::LazydocConfig;
use crate::error::{Result, ResultExt};

/// Runs the synthesis pass over the configured target.
///
/// Every file that was attempted is printed to `out`, one path per line.
/// Files that failed are logged and left unchanged; they do not make the
/// command fail.
pub fn execute(config: &LazydocConfig, out: &mut impl Write) -> Result<RunReport> {
    let target = config.validate()?;
    let commenter = LazyCommenter::new(config.comment_options());

    info!(path = %target.display(), comment = %commenter.options().default_comment, "annotating");
    let report = commenter.process_target(target).with_path(target)?;

    for outcome in &report.files {
        writeln!(out, "{}", outcome.path().display()).context("Failed to write file list")?;
        if let FileOutcome::Failed(failure) = outcome {
            error!("{failure}");
        }
    }

    let failures = report.failures().count();
    info!(
        files = report.files.len(),
        failures,
        comments = report.comments_synthesized(),
        "done"
    );
    Ok(report)
}
