//! Synchronous side channel for echoes, dropped records and writer faults

use crate::LogRecord;
use std::error::Error as StdError;
use std::io::Write;

/// Destination for output that must not wait on the asynchronous writer.
pub trait DiagnosticSink: Send + Sync + 'static {
    /// Immediate copy of a formatted message, printed before it is queued
    fn echo(&self, message: &str);

    /// A record that will never reach the log file
    fn message_lost(&self, record: &LogRecord);

    /// An I/O failure inside the background writer
    fn writer_fault(&self, error: &dyn StdError);
}

/// Text reported for a lost record
#[must_use]
pub fn loss_notice(record: &LogRecord) -> String {
    format!("msg loss: {record}")
}

/// Text reported for a writer fault
#[must_use]
pub fn fault_notice(error: &dyn StdError) -> String {
    format!("log writer fault: {error}")
}

/// Writes echoes and loss notices to stdout, faults to stderr
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutDiagnostics;

impl DiagnosticSink for StdoutDiagnostics {
    fn echo(&self, message: &str) {
        let _ = writeln!(std::io::stdout().lock(), "{message}");
    }

    fn message_lost(&self, record: &LogRecord) {
        let _ = writeln!(std::io::stdout().lock(), "{}", loss_notice(record));
    }

    fn writer_fault(&self, error: &dyn StdError) {
        let _ = writeln!(std::io::stderr().lock(), "{}", fault_notice(error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CallerInfo, Severity};
    use chrono::{Local, TimeZone};
    use std::io;

    #[test]
    fn test_loss_notice_carries_the_record_line() {
        let at = Local.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).single().unwrap();
        let record = LogRecord::at(
            at,
            Severity::Warn,
            CallerInfo::new("handle", "src/server.rs", 42),
            "queue full",
        );

        assert_eq!(
            loss_notice(&record),
            "msg loss: [2024-05-06 07:08:09] [WARN] [handle:server.rs:42] queue full"
        );
    }

    #[test]
    fn test_fault_notice() {
        let error = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(fault_notice(&error), "log writer fault: denied");
    }
}
