//! lazydoc - adds placeholder doc comments to undocumented Go declarations.
//!
//! Parses arguments, sets up logging, loads configuration and runs the
//! annotate command. Fatal errors are rendered by miette and exit with
//! status 1.

use clap::Parser;
use lazydoc_cli::{cli, commands, config::LazydocConfig, error, logger};
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(!logger::should_use_colors());

    let result = LazydocConfig::load(&args)
        .and_then(|config| commands::run_execute(&config, &mut std::io::stdout().lock()))
        .map(|_| ());

    result.map_err(error::cli_error_to_miette)
}
