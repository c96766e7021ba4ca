//! Logging init: tracing to stderr, stdout stays free for progress lines.

use tracing_subscriber::EnvFilter;

use crate::progress::SuspendingStderr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (true, _) => Verbosity::Verbose,
            (false, true) => Verbosity::Quiet,
            (false, false) => Verbosity::Normal,
        }
    }

    fn default_filter(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn,downurl=info",
            Verbosity::Verbose => "info,downurl=debug",
        }
    }
}

/// `RUST_LOG` wins over the verbosity flags when set. Lines are written
/// with the progress bar suspended.
pub fn init_logging(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.default_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(|| SuspendingStderr)
        .with_ansi(false)
        .init();
}
