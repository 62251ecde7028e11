//! Leveled logging primitives shared by the zlog backends.
//!
//! This crate defines severities and the threshold filter, call-site capture,
//! the log record and its line format, the [`Logger`] trait with leveled
//! methods and macros, the synchronous diagnostic channel, and a console
//! backend. The asynchronous rotating file backend lives in
//! `zlog-logger-file`.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod caller;
mod console;
mod diagnostics;
mod error;
mod logger;
mod macros;
mod record;
mod severity;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use caller::CallerInfo;
pub use console::ConsoleLogger;
pub use diagnostics::{DiagnosticSink, StdoutDiagnostics, fault_notice, loss_notice};
pub use error::{Error, Result};
pub use logger::{Logger, LoggerExt};
pub use record::{LogRecord, TIMESTAMP_FORMAT};
pub use severity::{LevelFilter, Severity, is_enabled};
