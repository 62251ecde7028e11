//! Test support utilities
//!
//! In-memory loggers and diagnostic sinks for asserting on output. Only
//! available when the `test-support` feature is enabled.

use crate::{CallerInfo, DiagnosticSink, LevelFilter, LogRecord, Logger, Severity};
use std::error::Error as StdError;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A logger that captures all records in memory
#[derive(Clone, Debug)]
pub struct CaptureLogger {
    records: Arc<Mutex<Vec<LogRecord>>>,
    calls: Arc<Mutex<usize>>,
    filter: LevelFilter,
}

impl CaptureLogger {
    /// Create a capture logger passing `min` and above
    pub fn new(min: Severity) -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(0)),
            filter: LevelFilter::new(min),
        }
    }

    /// All captured records
    pub fn records(&self) -> Vec<LogRecord> {
        lock(&self.records).clone()
    }

    /// All captured records rendered as log lines
    pub fn lines(&self) -> Vec<String> {
        lock(&self.records).iter().map(ToString::to_string).collect()
    }

    /// Number of times `log` was entered, whether or not it recorded
    pub fn log_calls(&self) -> usize {
        *lock(&self.calls)
    }

    /// Check if any record message contains `text`
    pub fn contains(&self, text: &str) -> bool {
        lock(&self.records)
            .iter()
            .any(|record| record.message().contains(text))
    }

    /// Clear captured records
    pub fn clear(&self) {
        lock(&self.records).clear();
        *lock(&self.calls) = 0;
    }
}

impl Logger for CaptureLogger {
    fn min_severity(&self) -> Severity {
        self.filter.min()
    }

    fn log(&self, severity: Severity, caller: CallerInfo, args: fmt::Arguments<'_>) {
        *lock(&self.calls) += 1;
        if !self.filter.is_enabled(severity) {
            return;
        }
        lock(&self.records).push(LogRecord::new(severity, caller, args.to_string()));
    }
}

/// A diagnostic sink that keeps every notice it receives
#[derive(Debug, Default)]
pub struct CaptureDiagnostics {
    echoes: Mutex<Vec<String>>,
    lost: Mutex<Vec<LogRecord>>,
    faults: Mutex<Vec<String>>,
}

impl CaptureDiagnostics {
    /// Create an empty sink behind an `Arc`, ready to hand to a logger
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Echoed messages, in order
    pub fn echoes(&self) -> Vec<String> {
        lock(&self.echoes).clone()
    }

    /// Records reported as lost, in order
    pub fn lost(&self) -> Vec<LogRecord> {
        lock(&self.lost).clone()
    }

    /// Rendered writer faults, in order
    pub fn faults(&self) -> Vec<String> {
        lock(&self.faults).clone()
    }
}

impl DiagnosticSink for CaptureDiagnostics {
    fn echo(&self, message: &str) {
        lock(&self.echoes).push(message.to_string());
    }

    fn message_lost(&self, record: &LogRecord) {
        lock(&self.lost).push(record.clone());
    }

    fn writer_fault(&self, error: &dyn StdError) {
        lock(&self.faults).push(error.to_string());
    }
}
