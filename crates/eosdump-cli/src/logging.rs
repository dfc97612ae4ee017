//! Logging setup: console plus a plain-text log file in the output
//! directory, thread ids on so tick-thread callbacks are distinguishable.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::CliError;

/// Initialize the global subscriber. `RUST_LOG` overrides the default
/// `info` filter.
pub fn init(log_file: &Path) -> Result<(), CliError> {
    let file = File::create(log_file).map_err(|source| CliError::Io {
        path: log_file.to_path_buf(),
        source,
    })?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            fmt::layer()
                .with_thread_ids(true)
                .with_target(false),
        )
        .with(
            fmt::layer()
                .with_thread_ids(true)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}
