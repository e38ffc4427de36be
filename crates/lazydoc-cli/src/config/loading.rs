use crate::cli::Cli;
use crate::config::LazydocConfig;
use crate::error::{ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Toml},
};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "lazydoc.toml";

/// Only the flags the user actually passed, so unset flags don't shadow
/// lower-priority sources.
#[derive(Debug, Serialize)]
struct CliOverrides<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dir: Option<&'a Path>,
}

impl<'a> From<&'a Cli> for CliOverrides<'a> {
    fn from(args: &'a Cli) -> Self {
        Self {
            comment: args.comment.as_deref(),
            dir: args.dir.as_deref(),
        }
    }
}

impl LazydocConfig {
    /// Load configuration from multiple sources.
    /// Priority: CLI args > environment variables > config file > defaults
    pub fn load(args: &Cli) -> Result<Self> {
        Self::load_from(args, Path::new("."))
    }

    /// Like [`load`](Self::load), looking for the config file in `root`.
    pub fn load_from(args: &Cli, root: &Path) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let config_file = root.join(CONFIG_FILE);
        if config_file.exists() {
            debug!(path = %config_file.display(), "reading config file");
            figment = figment.merge(Toml::file(config_file));
        }

        // LAZYDOC_COMMENT, LAZYDOC_DIR
        figment = figment.merge(Env::prefixed("LAZYDOC_"));

        figment = figment.merge(Serialized::defaults(CliOverrides::from(args)));

        figment.extract().map_err(|e| {
            ConfigError::InvalidValue {
                field: "configuration".to_string(),
                value: e.to_string(),
                hint: format!("Check {CONFIG_FILE} syntax and LAZYDOC_* variables"),
            }
            .into()
        })
    }
}
