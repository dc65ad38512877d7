//! Diagnostic logging
//!
//! Events go to stderr so command output on stdout stays clean. `RUST_LOG`
//! takes precedence; otherwise the level is `warn`, or `debug` for this
//! crate when `-v` is given.

use tracing_subscriber::{
    fmt::{
        self,
        format::{Format, Full},
    },
    prelude::*,
    EnvFilter,
};

fn build_base_log_format() -> Format<Full, ()> {
    fmt::format()
        .with_level(true)
        .with_ansi(false)
        .with_target(true)
        .without_time()
}

fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "warn,akiba=debug,reqwest=info"
    } else {
        "warn"
    }
}

pub fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let stderr_layer = fmt::layer()
        .event_format(build_base_log_format())
        .with_writer(std::io::stderr);

    // A subscriber may already be installed when embedded in tests
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}
