use thiserror::Error;

/// Result type for logger operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors shared by every logging backend.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The severity name is not one of `debug|trace|info|warn|error|fatal`.
    #[error("unrecognized log level name: {0:?}")]
    UnknownSeverity(String),
}
