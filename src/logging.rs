// src/logging.rs

//! Tracing subscriber setup for the binary.
//!
//! Filter priority: `UCS_FIGURES_LOG`, then `RUST_LOG`, then the
//! `--verbose`/`--quiet` flags, then `info`. Logs go to stderr so tables
//! printed on stdout stay clean.

use tracing::Level;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "UCS_FIGURES_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    /// Verbose wins when both flags are given.
    pub const fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            Self::Verbose
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    pub const fn default_level(self) -> Level {
        match self {
            Self::Quiet => Level::WARN,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
        }
    }
}

/// Install the global subscriber. Call once, before loading config.
pub fn init_subscriber(verbosity: Verbosity) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact();
    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(build_env_filter(verbosity))
        .with(fmt_layer)
        .try_init();
}

fn build_env_filter(verbosity: Verbosity) -> EnvFilter {
    if let Ok(directives) = std::env::var(LOG_ENV_VAR) {
        if let Ok(filter) = EnvFilter::try_new(&directives) {
            return filter;
        }
    }
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = verbosity.default_level();
    EnvFilter::try_new(level.as_str()).unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(true, false), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Verbose);
    }

    #[test]
    fn test_default_levels() {
        assert_eq!(Verbosity::Quiet.default_level(), Level::WARN);
        assert_eq!(Verbosity::Normal.default_level(), Level::INFO);
        assert_eq!(Verbosity::Verbose.default_level(), Level::DEBUG);
    }
}

// src/logging.rs
