//! Background writer draining the queue into the file set

use crate::config::IoErrorPolicy;
use crate::error::{Error, Result};
use crate::files::{FileSet, Target};
use crate::queue::QueueReceiver;
use chrono::Local;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};
use zlog_logger::{DiagnosticSink, LogRecord};

/// Name of the writer thread
pub const WRITER_THREAD_NAME: &str = "zlog-file-writer";

/// The single consumer of the record queue.
///
/// It owns the file set outright, so file handles need no locking.
pub(crate) struct RotatingWriter {
    files: FileSet,
    receiver: QueueReceiver,
    policy: IoErrorPolicy,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl RotatingWriter {
    pub(crate) fn new(
        files: FileSet,
        receiver: QueueReceiver,
        policy: IoErrorPolicy,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            files,
            receiver,
            policy,
            diagnostics,
        }
    }

    /// Run the writer on its own thread until `shutdown` is cancelled or
    /// every sender is gone.
    pub(crate) fn spawn(self, shutdown: CancellationToken) -> Result<JoinHandle<Result<()>>> {
        thread::Builder::new()
            .name(WRITER_THREAD_NAME.to_string())
            .spawn(move || {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .build()
                    .map_err(|e| Error::Io("failed to build writer runtime", e))?;
                runtime.block_on(self.run(shutdown))
            })
            .map_err(|e| Error::Io("failed to spawn writer thread", e))
    }

    async fn run(mut self, shutdown: CancellationToken) -> Result<()> {
        debug!(
            path = %self.files.file(Target::Main).path().display(),
            "log writer started"
        );

        let result = loop {
            tokio::select! {
                biased;

                record = self.receiver.recv() => match record {
                    Some(record) => {
                        if let Err(e) = self.process(&record) {
                            break Err(e);
                        }
                    }
                    // All senders dropped
                    None => break Ok(()),
                },

                () = shutdown.cancelled() => break self.drain(),
            }
        };

        // Refuse anything sent after a fatal fault
        self.receiver.close();
        if result.is_err() {
            self.discard();
        }

        if let Err(e) = self.files.flush() {
            warn!(error = %e, "failed to flush log files on shutdown");
        }

        match &result {
            Ok(()) => debug!("log writer stopped"),
            Err(e) => error!(error = %e, "log writer stopped on I/O failure"),
        }
        result
    }

    /// Write everything still queued, refusing new records
    fn drain(&mut self) -> Result<()> {
        self.receiver.close();

        let mut drained = 0usize;
        while let Some(record) = self.receiver.try_recv() {
            self.process(&record)?;
            drained += 1;
        }

        debug!(drained, "log writer drained queue");
        Ok(())
    }

    /// Report every record still queued as lost; the queue must be closed
    fn discard(&mut self) {
        let mut discarded = 0usize;
        while let Some(record) = self.receiver.try_recv() {
            self.diagnostics.message_lost(&record);
            discarded += 1;
        }
        if discarded > 0 {
            warn!(discarded, "log writer discarded queued records");
        }
    }

    /// Write one record, reporting it as lost if the writer has to stop
    fn process(&mut self, record: &LogRecord) -> Result<()> {
        self.handle(record).inspect_err(|_| {
            self.diagnostics.message_lost(record);
        })
    }

    fn handle(&mut self, record: &LogRecord) -> Result<()> {
        let line = record.to_line();

        self.write(Target::Main, &line)?;
        if record.severity().is_error() {
            self.write(Target::Error, &line)?;
        }
        Ok(())
    }

    fn write(&mut self, target: Target, line: &str) -> Result<()> {
        if let Err(e) = self.files.rotate_if_needed(target, Local::now()) {
            self.fault(e)?;
        }
        if let Err(e) = self.files.append(target, line.as_bytes()) {
            self.fault(e)?;
        }
        Ok(())
    }

    /// Apply the I/O policy: report, then either carry on or stop
    fn fault(&self, error: Error) -> Result<()> {
        self.diagnostics.writer_fault(&error);
        match self.policy {
            IoErrorPolicy::Continue => {
                warn!(error = %error, "log writer I/O failure, continuing");
                Ok(())
            }
            IoErrorPolicy::Stop => Err(error),
        }
    }
}
