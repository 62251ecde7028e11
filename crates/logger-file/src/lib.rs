//! File-based logger with a bounded queue and size-triggered rotation
//!
//! Producers never block: each log call formats a record and tries to push
//! it onto a bounded queue, reporting it as lost when the queue is full. One
//! background thread drains the queue in order, rotates files that grew past
//! the size limit and appends each record to the main log, copying ERROR and
//! FATAL records to the error log.

#![warn(missing_docs, unreachable_pub)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod files;
mod logger;
mod queue;
mod writer;

pub use config::{
    DEFAULT_MAX_FILE_SIZE, DEFAULT_QUEUE_CAPACITY, ERROR_LOG_SUFFIX, ErrorLog, FileLoggerConfig,
    FileLoggerConfigBuilder, IoErrorPolicy,
};
pub use error::{Error, Result};
pub use files::{BACKUP_SUFFIX_FORMAT, FileSet, ManagedFile, Target, backup_path};
pub use logger::{FileLogger, LoggerStats};
pub use queue::{PushError, QueueReceiver, QueueSender, message_queue};
pub use writer::WRITER_THREAD_NAME;
