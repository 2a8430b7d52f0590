//! Logging setup for the structsearch CLI.
//!
//! Structured logging via `tracing`. The pipeline's own verbosity parameter
//! (0 = quiet .. 3 = debug) doubles as the default log filter; `RUST_LOG`
//! overrides it when set.

use std::io::IsTerminal;

use tracing_subscriber::{fmt, EnvFilter};

/// Map the pipeline verbosity parameter to a default log filter.
fn default_filter(verbosity: u32) -> &'static str {
    match verbosity {
        0 => "error",
        1 => "warn",
        2 => "info",
        _ => "debug",
    }
}

/// Initialize the global tracing subscriber.
///
/// Safe to call more than once; later calls are no-ops. Colors are enabled
/// only when stderr is a terminal and `NO_COLOR` is unset.
pub fn init_tracing(verbosity: u32) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    let use_color = std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none();

    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(use_color)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_expected_filters() {
        assert_eq!(default_filter(0), "error");
        assert_eq!(default_filter(1), "warn");
        assert_eq!(default_filter(2), "info");
        assert_eq!(default_filter(3), "debug");
        assert_eq!(default_filter(99), "debug");
    }

    #[test]
    fn init_tracing_is_idempotent() {
        init_tracing(3);
        init_tracing(0);
    }
}
