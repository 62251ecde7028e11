//! Core logger trait

use crate::{CallerInfo, LevelFilter, Severity};
use std::fmt;

/// Backend-agnostic logger.
///
/// Call sites check [`Logger::is_enabled`] before building a record, and
/// implementations check it again inside [`Logger::log`] before formatting.
/// Both checks go through [`LevelFilter`] so they always agree.
pub trait Logger: Send + Sync + 'static {
    /// Configured minimum severity
    fn min_severity(&self) -> Severity;

    /// Check if a level is enabled (for fast filtering)
    #[inline]
    fn is_enabled(&self, severity: Severity) -> bool {
        LevelFilter::new(self.min_severity()).is_enabled(severity)
    }

    /// Log a message for the given call site
    fn log(&self, severity: Severity, caller: CallerInfo, args: fmt::Arguments<'_>);

    /// Flush anything the backend holds
    fn flush(&self) {}
}

/// Leveled convenience methods.
///
/// These are `#[track_caller]`, so the recorded file and line are those of the
/// code calling `info`/`error`/..., not of this trait. A `Location` carries no
/// function name, so these methods record `?` in its place
/// (`[?:main.rs:12]`). Use the leveled macros ([`info!`](crate::info),
/// [`error!`](crate::error), ...) where the function name matters.
pub trait LoggerExt: Logger {
    /// Log at an explicit severity
    #[inline]
    #[track_caller]
    fn log_at(&self, severity: Severity, message: impl fmt::Display) {
        if self.is_enabled(severity) {
            self.log(severity, CallerInfo::here(), format_args!("{message}"));
        }
    }

    /// Log debug
    #[inline]
    #[track_caller]
    fn debug(&self, message: impl fmt::Display) {
        self.log_at(Severity::Debug, message);
    }

    /// Log trace
    #[inline]
    #[track_caller]
    fn trace(&self, message: impl fmt::Display) {
        self.log_at(Severity::Trace, message);
    }

    /// Log info
    #[inline]
    #[track_caller]
    fn info(&self, message: impl fmt::Display) {
        self.log_at(Severity::Info, message);
    }

    /// Log a warning
    #[inline]
    #[track_caller]
    fn warn(&self, message: impl fmt::Display) {
        self.log_at(Severity::Warn, message);
    }

    /// Log an error
    #[inline]
    #[track_caller]
    fn error(&self, message: impl fmt::Display) {
        self.log_at(Severity::Error, message);
    }

    /// Log at fatal severity. This does not terminate the process.
    #[inline]
    #[track_caller]
    fn fatal(&self, message: impl fmt::Display) {
        self.log_at(Severity::Fatal, message);
    }
}

// Implement for all loggers
impl<T: Logger + ?Sized> LoggerExt for T {}
