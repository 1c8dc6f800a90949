//! In-memory sinks for exercising the registry without a transport.

use crate::message::Message;
use crate::sink::{Sink, SinkError};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Records every frame written to it. Can be closed to simulate a client
/// that went away.
pub(crate) struct RecordingSink {
    frames: Mutex<Vec<String>>,
    closed: AtomicBool,
    fail_flush: bool,
}

impl RecordingSink {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            frames: Mutex::new(Vec::new()),
            closed: AtomicBool::new(false),
            fail_flush: false,
        })
    }

    /// Accepts writes but always fails to flush.
    pub(crate) fn failing_flush() -> Arc<Self> {
        Arc::new(Self {
            frames: Mutex::new(Vec::new()),
            closed: AtomicBool::new(false),
            fail_flush: true,
        })
    }

    pub(crate) fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub(crate) fn frames(&self) -> Vec<String> {
        self.frames.lock().clone()
    }
}

impl Sink for RecordingSink {
    fn write(&self, message: &Message) -> Result<(), SinkError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(SinkError::Closed);
        }
        self.frames.lock().push(message.frame());
        Ok(())
    }

    fn flush(&self) -> Result<(), SinkError> {
        if self.fail_flush || self.closed.load(Ordering::SeqCst) {
            Err(SinkError::Closed)
        } else {
            Ok(())
        }
    }
}
