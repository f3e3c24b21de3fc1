//! File-backed `tracing` bootstrap.
//!
//! A TUI owns stdout, so log lines have to go somewhere else. Libraries in
//! this workspace only emit `tracing` events; binaries decide where they go.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::runtime::ProgramError;

/// Default filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Install a global `tracing` subscriber that appends to `path`.
///
/// The filter is read from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
/// If a global subscriber is already installed the existing one is kept and
/// this returns `Ok(())`.
///
/// # Example
///
/// ```no_run
/// sago_core::logging::init_file_logging("sago.log").unwrap();
/// tracing::info!("logging to file");
/// ```
pub fn init_file_logging(path: impl AsRef<Path>) -> Result<(), ProgramError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path.as_ref())
        .map_err(ProgramError::LogFile)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file))
        .try_init();

    if installed.is_err() {
        tracing::debug!("global subscriber already installed; keeping it");
    }
    Ok(())
}
