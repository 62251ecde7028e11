//! Console logger for development

use crate::{CallerInfo, LevelFilter, LogRecord, Logger, Severity};
use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex};

#[cfg(feature = "color")]
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Logger that writes each record straight to stdout
#[derive(Clone)]
pub struct ConsoleLogger {
    filter: LevelFilter,
    /// Lock for stdout (to prevent interleaving)
    #[cfg(not(feature = "color"))]
    stdout: Arc<Mutex<std::io::Stdout>>,
    #[cfg(feature = "color")]
    stdout: Arc<Mutex<StandardStream>>,
}

impl ConsoleLogger {
    /// Create a console logger passing `min` and above
    pub fn new(min: Severity) -> Self {
        Self {
            filter: LevelFilter::new(min),
            #[cfg(not(feature = "color"))]
            stdout: Arc::new(Mutex::new(std::io::stdout())),
            #[cfg(feature = "color")]
            stdout: Arc::new(Mutex::new(StandardStream::stdout(ColorChoice::Auto))),
        }
    }

    /// Create a console logger from a level name such as `"info"`
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a known severity.
    pub fn from_level_name(name: &str) -> crate::Result<Self> {
        Ok(Self::new(name.parse()?))
    }
}

impl fmt::Debug for ConsoleLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleLogger")
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "color")]
const fn level_color(severity: Severity) -> Color {
    match severity {
        Severity::Debug => Color::Cyan,
        Severity::Trace => Color::Magenta,
        Severity::Info => Color::Green,
        Severity::Warn => Color::Yellow,
        Severity::Error => Color::Red,
        Severity::Fatal => Color::Blue,
        Severity::Unknown => Color::White,
    }
}

impl Logger for ConsoleLogger {
    fn min_severity(&self) -> Severity {
        self.filter.min()
    }

    fn log(&self, severity: Severity, caller: CallerInfo, args: fmt::Arguments<'_>) {
        if !self.filter.is_enabled(severity) {
            return;
        }

        let record = LogRecord::new(severity, caller, args.to_string());

        // Write with lock
        if let Ok(mut stdout) = self.stdout.lock() {
            #[cfg(feature = "color")]
            {
                let _ = write!(stdout, "[{}] [", record.timestamp());

                let _ = stdout.set_color(
                    ColorSpec::new()
                        .set_fg(Some(level_color(severity)))
                        .set_bold(true),
                );
                let _ = write!(stdout, "{severity}");
                let _ = stdout.reset();

                let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::White)));
                let _ = write!(
                    stdout,
                    "] [{}:{}:{}]",
                    caller.function, caller.file, caller.line
                );
                let _ = stdout.reset();

                // Message dimmed
                let _ = stdout.set_color(ColorSpec::new().set_dimmed(true));
                let _ = write!(stdout, " {}", record.message());
                let _ = stdout.reset();
                let _ = writeln!(stdout);
            }

            #[cfg(not(feature = "color"))]
            {
                let _ = stdout.write_all(record.to_line().as_bytes());
            }

            let _ = stdout.flush();
        }
    }

    fn flush(&self) {
        if let Ok(mut stdout) = self.stdout.lock() {
            let _ = stdout.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LoggerExt;

    #[test]
    fn test_level_check() {
        let logger = ConsoleLogger::new(Severity::Info);

        assert!(!logger.is_enabled(Severity::Debug));
        assert!(!logger.is_enabled(Severity::Trace));
        assert!(logger.is_enabled(Severity::Info));
        assert!(logger.is_enabled(Severity::Fatal));
    }

    #[test]
    fn test_from_level_name() {
        let logger = ConsoleLogger::from_level_name("WARN").unwrap();
        assert_eq!(logger.min_severity(), Severity::Warn);
        assert!(ConsoleLogger::from_level_name("loud").is_err());
    }

    #[test]
    fn test_logging_does_not_panic() {
        let logger = ConsoleLogger::new(Severity::Debug);
        logger.debug("debug log...");
        crate::error!(logger, "error log: id={}", 10010);
        logger.fatal("fatal log...");
        logger.flush();
    }
}
