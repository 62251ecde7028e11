//! Log record type

use crate::{CallerInfo, Severity};
use chrono::{DateTime, Local};
use std::fmt;

/// Timestamp format used in log lines
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A formatted, timestamped log entry.
///
/// Records are immutable once built; ownership moves from the producer into
/// the queue and then to the writer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogRecord {
    timestamp: String,
    severity: Severity,
    caller: CallerInfo,
    message: String,
}

impl LogRecord {
    /// Create a record stamped with the current local time
    pub fn new(severity: Severity, caller: CallerInfo, message: impl Into<String>) -> Self {
        Self::at(Local::now(), severity, caller, message)
    }

    /// Create a record stamped with the given time
    pub fn at(
        time: DateTime<Local>,
        severity: Severity,
        caller: CallerInfo,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: time.format(TIMESTAMP_FORMAT).to_string(),
            severity,
            caller,
            message: message.into(),
        }
    }

    /// Formatted timestamp
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Record severity
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Call site
    pub const fn caller(&self) -> &CallerInfo {
        &self.caller
    }

    /// The formatted message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The on-disk line, including the trailing newline
    pub fn to_line(&self) -> String {
        format!("{self}\n")
    }
}

/// `[timestamp] [LEVEL] [func:file:line] message`
impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] [{}] [{}:{}:{}] {}",
            self.timestamp,
            self.severity,
            self.caller.function,
            self.caller.file,
            self.caller.line,
            self.message
        )
    }
}
