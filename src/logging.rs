//! File-backed tracing setup. The terminal belongs to the UI, so events go
//! to `onboarding.log` in the configured log directory.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// Errors that can occur while installing the log subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The log file could not be opened.
    #[error("could not open log file: {0}")]
    Io(#[from] io::Error),

    /// A global subscriber was already installed.
    #[error("could not install log subscriber: {0}")]
    Install(String),
}

/// Opens `path` for appending, creating it if needed.
pub fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

fn subscriber<W>(writer: W) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .finish()
}

/// Installs the global subscriber writing to the file at `path`.
#[mutants::skip]
pub fn init(path: &Path) -> Result<(), LoggingError> {
    let file = open_log_file(path)?;
    tracing::subscriber::set_global_default(subscriber(Mutex::new(file)))
        .map_err(|e| LoggingError::Install(e.to_string()))
}
