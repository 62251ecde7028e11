//! Leveled logging macros.
//!
//! Each macro takes the logger first, then `format!`-style arguments:
//!
//! ```no_run
//! use zlog_logger::{ConsoleLogger, Severity, error};
//!
//! let logger = ConsoleLogger::new(Severity::Info);
//! let id = 10010;
//! error!(logger, "error log: id={id}");
//! ```

/// Log at an explicit severity with the enclosing function as caller.
#[macro_export]
macro_rules! log {
    ($logger:expr, $severity:expr, $($arg:tt)+) => {{
        #[allow(unused_imports)]
        use $crate::Logger as _;
        let logger = &$logger;
        let severity: $crate::Severity = $severity;
        if logger.is_enabled(severity) {
            logger.log(severity, $crate::caller_info!(), ::std::format_args!($($arg)+));
        }
    }};
}

/// Log at debug severity.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Debug, $($arg)+)
    };
}

/// Log at trace severity.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Trace, $($arg)+)
    };
}

/// Log at info severity.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Info, $($arg)+)
    };
}

/// Log at warn severity.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Warn, $($arg)+)
    };
}

/// Log at error severity.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Error, $($arg)+)
    };
}

/// Log at fatal severity. The process keeps running.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Fatal, $($arg)+)
    };
}
