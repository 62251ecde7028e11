//! The producer-facing file logger

use crate::config::FileLoggerConfig;
use crate::error::{Error, Result};
use crate::files::FileSet;
use crate::queue::{QueueSender, message_queue};
use crate::writer::RotatingWriter;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use zlog_logger::{
    CallerInfo, DiagnosticSink, LevelFilter, LogRecord, Logger, Severity, StdoutDiagnostics,
};

/// Counters describing what the logger has accepted and lost
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoggerStats {
    /// Records handed to the writer queue
    pub enqueued: u64,
    /// Records dropped because the queue was full or closed
    pub dropped: u64,
    /// Records currently waiting in the queue
    pub queue_len: usize,
}

/// Asynchronous file logger.
///
/// Log calls format the message, echo it to the diagnostic channel and push a
/// record onto a bounded queue without ever blocking. A single background
/// thread writes the records, rotating files that grow past the configured
/// size. Records that do not fit in the queue are reported as lost.
pub struct FileLogger {
    filter: LevelFilter,
    echo: bool,
    main_path: PathBuf,
    sender: QueueSender,
    diagnostics: Arc<dyn DiagnosticSink>,
    enqueued: AtomicU64,
    dropped: AtomicU64,
    shutdown_token: CancellationToken,
    writer: Mutex<Option<JoinHandle<Result<()>>>>,
}

impl FileLogger {
    /// Open the log files and start the writer, reporting to stdout
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid, a file cannot be opened or
    /// the writer thread cannot be started.
    pub fn new(config: FileLoggerConfig) -> Result<Self> {
        Self::with_diagnostics(config, Arc::new(StdoutDiagnostics))
    }

    /// Open the log files and start the writer with a custom diagnostic sink
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid, a file cannot be opened or
    /// the writer thread cannot be started.
    pub fn with_diagnostics(
        config: FileLoggerConfig,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Result<Self> {
        config.validate()?;

        let files = FileSet::open(&config)?;
        let (sender, receiver) = message_queue(config.queue_capacity)?;
        let shutdown_token = CancellationToken::new();

        let writer = RotatingWriter::new(
            files,
            receiver,
            config.io_error_policy,
            diagnostics.clone(),
        )
        .spawn(shutdown_token.clone())?;

        let main_path = config.main_path();
        info!(
            path = %main_path.display(),
            min_severity = %config.min_severity,
            max_file_size = config.max_file_size,
            queue_capacity = config.queue_capacity,
            "file logger started"
        );

        Ok(Self {
            filter: LevelFilter::new(config.min_severity),
            echo: config.echo,
            main_path,
            sender,
            diagnostics,
            enqueued: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
            shutdown_token,
            writer: Mutex::new(Some(writer)),
        })
    }

    /// Build a logger from a level name, file name, directory and size limit
    ///
    /// # Errors
    ///
    /// Returns an error if the level name is unknown or the files cannot be
    /// opened.
    pub fn open(
        level_name: &str,
        file_name: &str,
        directory: impl Into<PathBuf>,
        max_file_size: u64,
    ) -> Result<Self> {
        let config = FileLoggerConfig::builder(directory, file_name)
            .min_severity(level_name.parse()?)
            .max_file_size(max_file_size)
            .build()?;
        Self::new(config)
    }

    /// Path of the main log file
    pub fn path(&self) -> &Path {
        &self.main_path
    }

    /// Snapshot of the counters
    pub fn stats(&self) -> LoggerStats {
        LoggerStats {
            enqueued: self.enqueued.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            queue_len: self.sender.len(),
        }
    }

    /// Whether the background writer is still alive
    pub fn is_writer_running(&self) -> bool {
        self.writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Stop the writer after it has written everything already queued.
    ///
    /// Later log calls report their records as lost. Calling this more than
    /// once is harmless.
    ///
    /// # Errors
    ///
    /// Returns the error that stopped the writer, if any.
    pub fn shutdown(&self) -> Result<()> {
        self.shutdown_token.cancel();

        let handle = self
            .writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        match handle {
            Some(handle) => handle.join().map_err(|_| Error::WriterPanicked)?,
            None => Ok(()),
        }
    }
}

impl fmt::Debug for FileLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileLogger")
            .field("filter", &self.filter)
            .field("path", &self.main_path)
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

impl Logger for FileLogger {
    fn min_severity(&self) -> Severity {
        self.filter.min()
    }

    fn log(&self, severity: Severity, caller: CallerInfo, args: fmt::Arguments<'_>) {
        if !self.filter.is_enabled(severity) {
            return;
        }

        let message = args.to_string();
        if self.echo {
            self.diagnostics.echo(&message);
        }

        let record = LogRecord::new(severity, caller, message);
        match self.sender.try_push(record) {
            Ok(()) => {
                self.enqueued.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                self.diagnostics.message_lost(&e.into_record());
            }
        }
    }
}

impl Drop for FileLogger {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            warn!(error = %e, "log writer ended with an error");
        }
    }
}
