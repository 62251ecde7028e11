//! Severity levels and the threshold filter applied to them

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Log severity, ordered by declaration.
///
/// `Unknown` is the zero value and never produced by parsing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Severity {
    /// Invalid or unset level
    #[default]
    Unknown,
    /// Debug level
    Debug,
    /// Trace level
    Trace,
    /// Info level
    Info,
    /// Warn level
    Warn,
    /// Error level
    Error,
    /// Fatal level (a label only, it never terminates the process)
    Fatal,
}

impl Severity {
    /// All parseable levels, lowest first
    pub const ALL: [Self; 6] = [
        Self::Debug,
        Self::Trace,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Fatal,
    ];

    /// Upper-case name as written to log lines
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        }
    }

    /// Whether records at this level also go to the error log
    #[must_use]
    pub fn is_error(self) -> bool {
        self >= Self::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            _ => Err(Error::UnknownSeverity(s.to_string())),
        }
    }
}

impl TryFrom<String> for Severity {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// True iff `severity` is at or above `min`.
#[inline]
#[must_use]
pub fn is_enabled(severity: Severity, min: Severity) -> bool {
    severity >= min
}

/// Threshold gate shared by every backend
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LevelFilter {
    min: Severity,
}

impl LevelFilter {
    /// Create a filter passing `min` and everything above it
    #[must_use]
    pub const fn new(min: Severity) -> Self {
        Self { min }
    }

    /// The configured threshold
    #[must_use]
    pub const fn min(&self) -> Severity {
        self.min
    }

    /// Check a record's severity against the threshold
    #[inline]
    #[must_use]
    pub fn is_enabled(&self, severity: Severity) -> bool {
        is_enabled(severity, self.min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_declaration_order() {
        assert!(Severity::Unknown < Severity::Debug);
        assert!(Severity::Debug < Severity::Trace);
        assert!(Severity::Trace < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Info".parse::<Severity>(), Ok(Severity::Info));
        assert_eq!("WARN".parse::<Severity>(), Ok(Severity::Warn));
        assert_eq!("fatal".parse::<Severity>(), Ok(Severity::Fatal));
        assert_eq!("tRaCe".parse::<Severity>(), Ok(Severity::Trace));
    }

    #[test]
    fn test_parse_rejects_unknown_names() {
        assert_matches!("unknown".parse::<Severity>(), Err(Error::UnknownSeverity(name)) if name == "unknown");
        assert_matches!("".parse::<Severity>(), Err(Error::UnknownSeverity(_)));
        assert_matches!("warning".parse::<Severity>(), Err(Error::UnknownSeverity(_)));
    }

    #[test]
    fn test_names_round_trip() {
        for severity in Severity::ALL {
            assert_eq!(severity.as_str().parse::<Severity>(), Ok(severity));
        }
        assert_eq!(Severity::Unknown.to_string(), "UNKNOWN");
    }

    #[test]
    fn test_filter_boundaries() {
        for (i, min) in Severity::ALL.iter().enumerate() {
            let filter = LevelFilter::new(*min);
            assert!(filter.is_enabled(*min), "{min} should pass its own threshold");
            if i > 0 {
                let below = Severity::ALL[i - 1];
                assert!(!filter.is_enabled(below), "{below} should not pass {min}");
            }
        }
    }

    #[test]
    fn test_deserialize_from_toml_name() {
        #[derive(Debug, Deserialize)]
        struct Levels {
            file: Severity,
            console: Severity,
        }

        let levels: Levels = toml::from_str("file = \"Warn\"\nconsole = \"debug\"").unwrap();
        assert_eq!(levels.file, Severity::Warn);
        assert_eq!(levels.console, Severity::Debug);

        let err = toml::from_str::<Levels>("file = \"verbose\"\nconsole = \"info\"").unwrap_err();
        assert!(err.to_string().contains("unrecognized log level name"));
    }

    #[test]
    fn test_error_log_threshold() {
        assert!(!Severity::Warn.is_error());
        assert!(Severity::Error.is_error());
        assert!(Severity::Fatal.is_error());
    }
}
