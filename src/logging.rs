//! Diagnostic logging to stderr.
//!
//! stdout carries command output only, so every log line goes to stderr.

use std::sync::Once;

use tracing::level_filters::LevelFilter;
use tracing::{debug, info};
use tracing_subscriber::fmt::{self, format::FmtSpan};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Map the `-d` count to a level filter.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Filter directives for `verbosity`: the library and binary targets follow `-d`,
/// dependencies stay at warn.
pub fn filter_directives(verbosity: u8) -> String {
    let level = level_for(verbosity).to_string().to_lowercase();
    format!("warn,task_tracker={level},task={level}")
}

/// Install the global subscriber for the binary.
pub fn setup_logging(verbosity: u8) {
    let filter = level_for(verbosity);
    let env_filter = EnvFilter::try_new(filter_directives(verbosity))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false);

    let filtered_layer = fmt_layer.with_filter(env_filter);

    if tracing_subscriber::registry()
        .with(filtered_layer)
        .try_init()
        .is_err()
    {
        return;
    }

    match filter {
        LevelFilter::INFO => info!("Debug mode: info"),
        LevelFilter::DEBUG => debug!("Debug mode: debug"),
        LevelFilter::TRACE => debug!("Debug mode: trace"),
        _ => {}
    }
}

static TEST_SETUP: Once = Once::new();

/// Install a test subscriber once per process. Honours `RUST_LOG`, default `debug`.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_test_writer()
                .with_target(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_filter(env_filter),
        );

        if tracing::dispatcher::has_been_set() {
            debug!("Tracing subscriber already set");
        } else if let Err(e) = subscriber.try_init() {
            eprintln!("Error: Failed to set up logging: {e}");
        }
        info!("Test Setup complete");
    });
}
