//! Logging configuration for run-sql.
//!
//! Diagnostics go to stderr so they never interleave with the progress
//! lines on stdout. `RUST_LOG` overrides the default filter.

use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor `--verbose` is given.
pub const DEFAULT_FILTER: &str = "warn";

/// Filter used with `--verbose`.
pub const VERBOSE_FILTER: &str = "sql_rpc_runner=debug,run_sql=debug,info";

/// Initializes stderr logging.
pub fn init_stderr_logging(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Builds the filter: `RUST_LOG` first, then the verbosity default.
fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    }
}
