//! Bounded record queue between producers and the writer
//!
//! Many producers push without ever waiting; exactly one receiver drains the
//! queue in arrival order.

use crate::error::{Error, Result};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::{TryRecvError, TrySendError};
use zlog_logger::LogRecord;

/// Create a queue holding at most `capacity` records
///
/// # Errors
///
/// Returns an error if `capacity` is zero.
pub fn message_queue(capacity: usize) -> Result<(QueueSender, QueueReceiver)> {
    if capacity == 0 {
        return Err(Error::Configuration(
            "queue capacity must be greater than zero".to_string(),
        ));
    }
    let (sender, receiver) = mpsc::channel(capacity);
    Ok((QueueSender { sender }, QueueReceiver { receiver }))
}

/// A record that could not be queued, handed back to the producer
#[derive(Debug, thiserror::Error)]
pub enum PushError {
    /// The queue is at capacity
    #[error("log queue is full")]
    Full(LogRecord),
    /// The writer is gone
    #[error("log queue is closed")]
    Closed(LogRecord),
}

impl PushError {
    /// Recover the rejected record
    pub fn into_record(self) -> LogRecord {
        match self {
            Self::Full(record) | Self::Closed(record) => record,
        }
    }
}

/// Producer half; cheap to clone
#[derive(Clone, Debug)]
pub struct QueueSender {
    sender: mpsc::Sender<LogRecord>,
}

impl QueueSender {
    /// Queue a record or fail immediately
    ///
    /// # Errors
    ///
    /// Returns the record inside [`PushError`] when the queue is full or closed.
    pub fn try_push(&self, record: LogRecord) -> std::result::Result<(), PushError> {
        self.sender.try_send(record).map_err(|e| match e {
            TrySendError::Full(record) => PushError::Full(record),
            TrySendError::Closed(record) => PushError::Closed(record),
        })
    }

    /// Records currently queued
    pub fn len(&self) -> usize {
        self.sender.max_capacity() - self.sender.capacity()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of queued records
    pub fn capacity(&self) -> usize {
        self.sender.max_capacity()
    }

    /// Whether the receiver has been closed or dropped
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Consumer half; there is exactly one
#[derive(Debug)]
pub struct QueueReceiver {
    receiver: mpsc::Receiver<LogRecord>,
}

impl QueueReceiver {
    /// Wait for the next record; `None` once every sender is gone
    pub async fn recv(&mut self) -> Option<LogRecord> {
        self.receiver.recv().await
    }

    /// Take the next record if one is ready
    pub fn try_recv(&mut self) -> Option<LogRecord> {
        match self.receiver.try_recv() {
            Ok(record) => Some(record),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Refuse new records; those already queued can still be received
    pub fn close(&mut self) {
        self.receiver.close();
    }
}
