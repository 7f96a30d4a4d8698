//! Tracing subscriber setup.
//!
//! The terminal owns stdout/stderr while the UI is running, so diagnostics
//! go to a log file. Filtering follows `RUST_LOG` with an INFO default.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global tracing subscriber with file logging.
///
/// Returns `false` if the log file could not be created; the app keeps
/// running without diagnostics in that case.
pub fn init_global(log_file_path: &Path) -> bool {
    let Ok(log_file) = File::create(log_file_path) else {
        return false;
    };
    build_subscriber(log_file).init();
    true
}

/// Build a subscriber writing to the given file.
pub fn build_subscriber(log_file: File) -> impl tracing::Subscriber + Send + Sync {
    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let fmt_layer = fmt::layer().with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
}
