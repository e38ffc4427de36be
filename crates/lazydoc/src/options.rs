//! Comment text settings for synthesized docs.

use serde::{Deserialize, Serialize};

/// Placeholder used when no default comment is configured.
pub const DEFAULT_COMMENT: &str = "--default comment--";

/// Options controlling comment synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentOptions {
    /// Text appended after the declaration name, e.g. `Foo <default_comment>`.
    pub default_comment: String,
}

impl Default for CommentOptions {
    fn default() -> Self {
        Self {
            default_comment: DEFAULT_COMMENT.to_string(),
        }
    }
}

impl CommentOptions {
    /// Uses `text` joined onto one line, or the built-in placeholder when it
    /// is blank.
    pub fn new(text: impl Into<String>) -> Self {
        let text = single_line(&text.into());
        if text.is_empty() {
            Self::default()
        } else {
            Self {
                default_comment: text,
            }
        }
    }

    /// Comment body for a declaration: `<name> <default_comment>`.
    ///
    /// Always a single line, even when the field was set directly.
    pub fn render(&self, name: &str) -> String {
        format!("{} {}", name, single_line(&self.default_comment))
    }
}

/// Trims each line of `text` and joins the non-empty ones with a space.
fn single_line(text: &str) -> String {
    text.split(['\n', '\r'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
