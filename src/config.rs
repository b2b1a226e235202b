//! Runtime configuration: submission endpoint and log directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::submit::DEFAULT_ENDPOINT;

/// Errors that can occur while resolving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while creating the log directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The platform does not provide a data directory.
    #[error("could not determine XDG data directory")]
    NoDataDir,
}

/// Where to submit and where to write the log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    endpoint: String,
    log_dir: PathBuf,
}

impl Config {
    /// Uses the default endpoint and the XDG data directory.
    ///
    /// The log directory (`~/.local/share/onboarding/`) is created if it
    /// does not already exist.
    pub fn new() -> Result<Self, ConfigError> {
        let data_dir = dirs::data_dir().ok_or(ConfigError::NoDataDir)?;
        Self::with_paths(DEFAULT_ENDPOINT, data_dir.join("onboarding"))
    }

    /// Uses the given endpoint and log directory, creating the directory.
    pub fn with_paths(
        endpoint: impl Into<String>,
        log_dir: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let log_dir = log_dir.into();
        fs::create_dir_all(&log_dir)?;
        Ok(Self {
            endpoint: endpoint.into(),
            log_dir,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Path of the log file inside [`log_dir`](Self::log_dir).
    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("onboarding.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_paths_creates_log_dir() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("nested").join("logs");
        let config = Config::with_paths("http://localhost/api", &log_dir).unwrap();
        assert!(log_dir.is_dir());
        assert_eq!(config.log_dir(), log_dir);
        assert_eq!(config.endpoint(), "http://localhost/api");
    }

    #[test]
    fn log_file_is_inside_log_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_paths(DEFAULT_ENDPOINT, dir.path()).unwrap();
        assert_eq!(config.log_file(), dir.path().join("onboarding.log"));
    }

    #[test]
    fn with_paths_fails_when_dir_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("taken");
        fs::write(&file, "x").unwrap();
        let err = Config::with_paths(DEFAULT_ENDPOINT, &file).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
