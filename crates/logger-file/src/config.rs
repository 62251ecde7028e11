//! Configuration for the file logger

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use zlog_logger::Severity;

/// Default bound on queued records
pub const DEFAULT_QUEUE_CAPACITY: usize = 50_000;

/// Default rotation threshold (10 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Suffix appended to the main file name for the default error log
pub const ERROR_LOG_SUFFIX: &str = ".err";

/// Where ERROR and FATAL records are copied
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorLog {
    /// A second file in the log directory
    Separate(String),
    /// The main file itself, so error records appear there twice
    SameAsMain,
}

/// What the writer does when a size check, rotation or write fails
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IoErrorPolicy {
    /// Report the fault, skip this rotation and keep writing
    #[default]
    Continue,
    /// Report the fault and stop the writer; the error is returned by shutdown
    Stop,
}

/// Configuration for [`FileLogger`](crate::FileLogger)
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct FileLoggerConfig {
    /// Minimum severity written
    pub min_severity: Severity,
    /// Main log file name
    pub file_name: String,
    /// Directory holding the log files (created if missing)
    pub directory: PathBuf,
    /// Files larger than this are rotated before the next write
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Bound on records waiting for the writer
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Error log placement; `None` means `<file_name>.err`
    #[serde(default)]
    pub error_log: Option<ErrorLog>,
    /// Writer behaviour on I/O failure
    #[serde(default)]
    pub io_error_policy: IoErrorPolicy,
    /// Print every accepted message to the diagnostic channel before queueing
    #[serde(default = "default_echo")]
    pub echo: bool,
}

const fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

const fn default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}

const fn default_echo() -> bool {
    true
}

impl FileLoggerConfig {
    /// Start building a config for `directory/file_name`
    pub fn builder(
        directory: impl Into<PathBuf>,
        file_name: impl Into<String>,
    ) -> FileLoggerConfigBuilder {
        FileLoggerConfigBuilder::new(directory, file_name)
    }

    /// Parse and validate a TOML document
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or the values are invalid.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Path of the main log file
    pub fn main_path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    /// Error log placement with the default resolved
    pub fn error_log(&self) -> ErrorLog {
        self.error_log.clone().unwrap_or_else(|| {
            ErrorLog::Separate(format!("{}{ERROR_LOG_SUFFIX}", self.file_name))
        })
    }

    /// Path of the error log, or `None` when it shares the main file
    pub fn error_path(&self) -> Option<PathBuf> {
        match self.error_log() {
            ErrorLog::Separate(name) => Some(self.directory.join(name)),
            ErrorLog::SameAsMain => None,
        }
    }

    /// Check the config for values the logger cannot run with
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.min_severity == Severity::Unknown {
            return Err(Error::Configuration(
                "min_severity must be a concrete level".to_string(),
            ));
        }
        validate_file_name("file_name", &self.file_name)?;
        if let ErrorLog::Separate(name) = self.error_log() {
            validate_file_name("error log name", &name)?;
            if name == self.file_name {
                return Err(Error::Configuration(
                    "separate error log must not reuse the main file name; use same_as_main"
                        .to_string(),
                ));
            }
        }
        if self.max_file_size == 0 {
            return Err(Error::Configuration(
                "max_file_size must be greater than zero".to_string(),
            ));
        }
        if self.queue_capacity == 0 {
            return Err(Error::Configuration(
                "queue_capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn validate_file_name(field: &str, name: &str) -> Result<()> {
    let is_plain = Path::new(name).file_name().is_some_and(|base| base == name);
    if name.is_empty() || !is_plain {
        return Err(Error::Configuration(format!(
            "{field} must be a plain file name, got {name:?}"
        )));
    }
    Ok(())
}

/// Builder for [`FileLoggerConfig`]
#[derive(Clone, Debug)]
pub struct FileLoggerConfigBuilder {
    config: FileLoggerConfig,
}

impl FileLoggerConfigBuilder {
    /// Defaults: INFO, 10 MiB files, 50,000 queued records, `<file_name>.err`
    /// error log, continue on I/O faults, echo on
    pub fn new(directory: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            config: FileLoggerConfig {
                min_severity: Severity::Info,
                file_name: file_name.into(),
                directory: directory.into(),
                max_file_size: DEFAULT_MAX_FILE_SIZE,
                queue_capacity: DEFAULT_QUEUE_CAPACITY,
                error_log: None,
                io_error_policy: IoErrorPolicy::default(),
                echo: true,
            },
        }
    }

    /// Set the minimum severity
    #[must_use]
    pub const fn min_severity(mut self, severity: Severity) -> Self {
        self.config.min_severity = severity;
        self
    }

    /// Set the rotation threshold in bytes
    #[must_use]
    pub const fn max_file_size(mut self, bytes: u64) -> Self {
        self.config.max_file_size = bytes;
        self
    }

    /// Set the queue bound
    #[must_use]
    pub const fn queue_capacity(mut self, capacity: usize) -> Self {
        self.config.queue_capacity = capacity;
        self
    }

    /// Set the error log placement
    #[must_use]
    pub fn error_log(mut self, error_log: ErrorLog) -> Self {
        self.config.error_log = Some(error_log);
        self
    }

    /// Set the I/O failure policy
    #[must_use]
    pub const fn io_error_policy(mut self, policy: IoErrorPolicy) -> Self {
        self.config.io_error_policy = policy;
        self
    }

    /// Enable or disable the synchronous echo
    #[must_use]
    pub const fn echo(mut self, echo: bool) -> Self {
        self.config.echo = echo;
        self
    }

    /// Validate and build the config
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if a value is invalid.
    pub fn build(self) -> Result<FileLoggerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
