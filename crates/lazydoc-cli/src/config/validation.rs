use crate::config::LazydocConfig;
use crate::error::{ConfigError, Result, ResultExt};
use std::path::Path;

impl LazydocConfig {
    /// Checks that a target was given and exists, returning it.
    pub fn validate(&self) -> Result<&Path> {
        let dir = match self.dir.as_deref() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => {
                return Err(ConfigError::MissingField {
                    field: "dir".to_string(),
                    hint: "Pass the Go file or directory to process with --dir <PATH>".to_string(),
                }
                .into());
            }
        };

        std::fs::metadata(dir).with_path(dir)?;
        Ok(dir)
    }
}
