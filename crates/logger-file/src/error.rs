//! Error types for file-based logging

use std::io;
use std::path::PathBuf;

/// Result type for file logger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during file logging
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error occurred
    #[error("{0}: {1}")]
    Io(&'static str, #[source] io::Error),

    /// Failed to create log directory
    #[error("failed to create log directory at {path}: {source}")]
    CreateDirectory {
        /// The path that failed to be created
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// Failed to open a log file
    #[error("failed to open log file {path}: {source}")]
    Open {
        /// The file that failed to open
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// Failed to rotate log file
    #[error("failed to rotate {path} to {backup}: {source}")]
    Rotation {
        /// The active log file
        path: PathBuf,
        /// Where it was being moved
        backup: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Configuration file could not be parsed
    #[error("failed to parse logger config: {0}")]
    ParseConfig(#[from] toml::de::Error),

    /// Unknown severity name
    #[error(transparent)]
    Severity(#[from] zlog_logger::Error),

    /// The background writer thread panicked
    #[error("log writer thread panicked")]
    WriterPanicked,
}
