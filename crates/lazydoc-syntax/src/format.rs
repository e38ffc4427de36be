//! Formatting options for printed Go source

/// Options controlling how [`GoPrinter`](crate::GoPrinter) renders a tree.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// End the file with exactly one newline.
    pub final_newline: bool,
    /// Rewrite `\r\n` line endings to `\n` across the whole file, as gofmt
    /// does.
    pub unix_line_endings: bool,
    /// Verify that every rendered doc group is registered in the tree's flat
    /// comment list.
    pub check_comment_list: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            final_newline: true,
            unix_line_endings: true,
            check_comment_list: true,
        }
    }
}

impl FormatOptions {
    /// Copy the source through untouched apart from changed docs.
    pub fn verbatim() -> Self {
        Self {
            final_newline: false,
            unix_line_endings: false,
            ..Self::default()
        }
    }
}
