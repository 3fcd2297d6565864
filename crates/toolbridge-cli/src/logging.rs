//! Log sink selection.
//!
//! Stdout carries the protocol, so logs go to a file or nowhere. The choice
//! is made once here; call sites use `tracing` macros unconditionally.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Build a subscriber that appends timestamped lines to `path`.
pub fn file_subscriber(
    path: &Path,
    filter: EnvFilter,
) -> std::io::Result<impl tracing::Subscriber + Send + Sync + 'static> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish())
}

/// Install the global log sink. Without a destination nothing is installed
/// and every event is discarded. A log file that cannot be opened disables
/// logging with a warning on stderr; it never stops the bridge.
pub fn init(log_file: Option<&Path>) {
    let Some(path) = log_file else {
        return;
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    match file_subscriber(path, filter) {
        Ok(subscriber) => {
            if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
                eprintln!("WARNING: logging disabled: {e}");
            }
        }
        Err(e) => eprintln!(
            "WARNING: cannot open log file {}: {e}; logging disabled",
            path.display()
        ),
    }
}
