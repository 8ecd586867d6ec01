//! Operator-facing logging
//!
//! All notices (skipped files, extraction failures, the run summary) go
//! through `tracing` to stderr. `WORDSCAN_LOG` overrides the level chosen
//! from the CLI flags.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an EnvFilter directive
pub const LOG_ENV: &str = "WORDSCAN_LOG";

/// Verbosity selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl Verbosity {
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Verbose,
            (false, false) => Verbosity::Normal,
        }
    }

    pub fn level(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "info",
            Verbosity::Verbose => "debug",
        }
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init_logging(verbosity: Verbosity, no_color: bool) {
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(verbosity.level()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(!no_color && std::io::stderr().is_terminal())
        .try_init();
}
