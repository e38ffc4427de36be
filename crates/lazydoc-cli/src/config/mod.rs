//! Configuration for lazydoc with multi-source loading.
//!
//! Merges settings from CLI args, environment variables, and config files.
//! Priority: CLI > Environment (`LAZYDOC_*`) > File (`lazydoc.toml`) > Defaults

mod loading;
mod validation;

use lazydoc::{CommentOptions, DEFAULT_COMMENT};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use loading::CONFIG_FILE;

/// lazydoc configuration - loaded from lazydoc.toml, the environment or CLI args.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LazydocConfig {
    /// Text placed after the declaration name in synthesized comments
    #[serde(default = "default_comment")]
    pub comment: String,

    /// Go file or directory to process
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

fn default_comment() -> String {
    DEFAULT_COMMENT.to_string()
}

impl Default for LazydocConfig {
    fn default() -> Self {
        Self {
            comment: default_comment(),
            dir: None,
        }
    }
}

impl LazydocConfig {
    /// Comment options for the library; a blank comment uses the default text.
    pub fn comment_options(&self) -> CommentOptions {
        CommentOptions::new(self.comment.as_str())
    }
}
