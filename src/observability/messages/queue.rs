// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for dispatch queues and subscriber callbacks.
//!
//! This module contains message types for logging events related to:
//! * Queue creation, worker start/stop and teardown
//! * Callback failures and panics

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Label used in messages for callbacks invoked on the poll loop thread.
pub const INLINE_QUEUE: &str = "<inline>";

/// A subscriber referenced a queue name that did not exist yet.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct QueueCreated<'a> {
    pub queue: &'a str,
}

impl Display for QueueCreated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Setting up new queue '{}'", self.queue)
    }
}

impl StructuredLog for QueueCreated<'_> {
    fn log(&self) {
        tracing::debug!(queue = self.queue, "{}", self);
    }
}

/// A queue worker thread started consuming.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct QueueStarted<'a> {
    pub queue: &'a str,
    pub thread: &'a str,
}

impl Display for QueueStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Starting queue '{}' on thread '{}'", self.queue, self.thread)
    }
}

impl StructuredLog for QueueStarted<'_> {
    fn log(&self) {
        tracing::debug!(queue = self.queue, thread = self.thread, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("queue_worker", span_name = name, queue = self.queue)
    }
}

/// A queue worker exited.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct QueueStopped<'a> {
    pub queue: &'a str,
    pub delivered: u64,
    pub discarded: usize,
}

impl Display for QueueStopped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Queue '{}' stopped: {} event(s) delivered, {} pending event(s) discarded",
            self.queue, self.delivered, self.discarded
        )
    }
}

impl StructuredLog for QueueStopped<'_> {
    fn log(&self) {
        tracing::debug!(
            queue = self.queue,
            delivered = self.delivered,
            discarded = self.discarded,
            "{}", self
        );
    }
}

/// The last subscriber of a queue was removed; the queue is being torn down.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct QueueUnused<'a> {
    pub queue: &'a str,
}

impl Display for QueueUnused<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Stopping unused queue '{}'", self.queue)
    }
}

impl StructuredLog for QueueUnused<'_> {
    fn log(&self) {
        tracing::debug!(queue = self.queue, "{}", self);
    }
}

/// A callback returned an error.
///
/// # Log Level
/// `warn!` - Contained fault, processing continues
///
/// # Example
/// ```
/// use journal_watch::observability::messages::queue::CallbackFailed;
///
/// let error = anyhow::anyhow!("database unavailable");
/// let msg = CallbackFailed {
///     queue: "storage",
///     event_type: "Docked",
///     line: 42,
///     error: error.as_ref(),
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct CallbackFailed<'a> {
    pub queue: &'a str,
    pub event_type: &'a str,
    pub line: u64,
    pub error: &'a (dyn std::error::Error + 'static),
}

impl Display for CallbackFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Callback on queue '{}' failed for '{}' event at line {}: {}",
            self.queue, self.event_type, self.line, self.error
        )
    }
}

impl StructuredLog for CallbackFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            queue = self.queue,
            event_type = self.event_type,
            line = self.line,
            error = %self.error,
            "{}", self
        );
    }
}

/// A callback panicked. The panic is contained to that one invocation.
///
/// # Log Level
/// `warn!` - Contained fault, processing continues
pub struct CallbackPanicked<'a> {
    pub queue: &'a str,
    pub event_type: &'a str,
    pub line: u64,
    pub message: &'a str,
}

impl Display for CallbackPanicked<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Callback on queue '{}' panicked for '{}' event at line {}: {}",
            self.queue, self.event_type, self.line, self.message
        )
    }
}

impl StructuredLog for CallbackPanicked<'_> {
    fn log(&self) {
        tracing::warn!(
            queue = self.queue,
            event_type = self.event_type,
            line = self.line,
            panic = self.message,
            "{}", self
        );
    }
}
