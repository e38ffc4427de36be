//! Logging setup for the lazydoc CLI.
//!
//! Log lines go to stderr so stdout only carries the names of processed
//! files. `RUST_LOG` overrides the default filter.
//!
//! # Example
//!
//! ```rust,no_run
//! use lazydoc_cli::logger::{init_logger, should_use_colors};
//! use tracing::info;
//!
//! init_logger(!should_use_colors());
//! info!("Starting run");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "lazydoc=info";

/// Initialize the tracing subscriber.
///
/// Should be called once at the start of the program, before any logging
/// occurs.
pub fn init_logger(no_color: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    init_logger_with_filter(filter, no_color);
}

/// Initialize logger with custom environment filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Check if colored output should be enabled.
///
/// `NO_COLOR` disables colors, `FORCE_COLOR` forces them; otherwise the
/// decision follows whether stderr is a color-capable terminal.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::Term::stderr().features().colors_supported()
}

#[cfg(test)]
mod tests {
    use super::*;

    // tracing is global and can only be initialized once per process, so
    // these only exercise filter construction.

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }

    #[test]
    fn test_debug_filter_parses() {
        assert!(EnvFilter::try_new("lazydoc=debug,lazydoc_syntax=trace").is_ok());
    }
}
