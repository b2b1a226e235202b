use crate::submit::SubmitError;

/// Errors that can occur in the TUI layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An I/O error occurred (terminal, event reading, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The submission client could not be created.
    #[error("submission client error: {0}")]
    Submit(#[from] SubmitError),
}
