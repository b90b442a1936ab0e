// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the poll loop lifecycle.
//!
//! This module contains message types for logging events related to:
//! * Watcher start and stop
//! * Deferred joins when stop is requested from a watcher-owned thread
//! * Synchronous replay
//! * Fatal source failures inside the poll loop

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Watcher transitioned to running.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use journal_watch::observability::messages::watcher::WatcherStarted;
/// use std::time::Duration;
///
/// let msg = WatcherStarted {
///     source: "Journal.170101000000.01.log",
///     from_start: true,
///     poll_interval: Duration::from_millis(100),
///     queue_count: 2,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct WatcherStarted<'a> {
    pub source: &'a str,
    pub from_start: bool,
    pub poll_interval: Duration,
    pub queue_count: usize,
}

impl Display for WatcherStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Watching '{}' ({}), poll_interval={:?}, {} queue(s)",
            self.source,
            if self.from_start { "from start" } else { "tail only" },
            self.poll_interval,
            self.queue_count
        )
    }
}

impl StructuredLog for WatcherStarted<'_> {
    fn log(&self) {
        tracing::info!(
            source = self.source,
            from_start = self.from_start,
            poll_interval_ms = self.poll_interval.as_millis() as u64,
            queue_count = self.queue_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "poll_loop",
            span_name = name,
            source = self.source,
            from_start = self.from_start,
        )
    }
}

/// Watcher transitioned back to idle.
///
/// # Log Level
/// `info!` - Important operational event
pub struct WatcherStopped<'a> {
    pub source: &'a str,
    pub queue_count: usize,
}

impl Display for WatcherStopped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Stopped watching '{}' ({} queue(s) shut down)",
            self.source, self.queue_count
        )
    }
}

impl StructuredLog for WatcherStopped<'_> {
    fn log(&self) {
        tracing::info!(
            source = self.source,
            queue_count = self.queue_count,
            "{}", self
        );
    }
}

/// A worker thread asked to stop itself; its join is skipped.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct JoinDeferred<'a> {
    pub thread: &'a str,
}

impl Display for JoinDeferred<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Stop requested from worker thread '{}'; it will exit after the current callback",
            self.thread
        )
    }
}

impl StructuredLog for JoinDeferred<'_> {
    fn log(&self) {
        tracing::debug!(thread = self.thread, "{}", self);
    }
}

/// A batch of newly appended lines was read and dispatched.
///
/// # Log Level
/// `trace!` - High-volume diagnostic detail
pub struct GrowthDetected<'a> {
    pub source: &'a str,
    pub previous_size: u64,
    pub new_size: u64,
    pub records: usize,
}

impl Display for GrowthDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "'{}' grew {} -> {} bytes, dispatched {} record(s)",
            self.source, self.previous_size, self.new_size, self.records
        )
    }
}

impl StructuredLog for GrowthDetected<'_> {
    fn log(&self) {
        tracing::trace!(
            source = self.source,
            previous_size = self.previous_size,
            new_size = self.new_size,
            records = self.records,
            "{}", self
        );
    }
}

/// Synchronous replay of the whole source started.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ReplayStarted<'a> {
    pub source: &'a str,
}

impl Display for ReplayStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Replaying '{}' synchronously", self.source)
    }
}

impl StructuredLog for ReplayStarted<'_> {
    fn log(&self) {
        tracing::info!(source = self.source, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("replay", span_name = name, source = self.source)
    }
}

/// Synchronous replay finished.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ReplayCompleted<'a> {
    pub source: &'a str,
    pub records: usize,
    pub duration: Duration,
}

impl Display for ReplayCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Replayed {} record(s) from '{}' in {:?}",
            self.records, self.source, self.duration
        )
    }
}

impl StructuredLog for ReplayCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            source = self.source,
            records = self.records,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }
}

/// The source failed while the poll loop was running. The loop exits.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use journal_watch::observability::messages::watcher::SourceFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::NotFound, "journal deleted");
/// let msg = SourceFailed {
///     source: "Journal.170101000000.01.log",
///     error: &error,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct SourceFailed<'a> {
    pub source: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for SourceFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Source '{}' failed, poll loop exiting: {}",
            self.source, self.error
        )
    }
}

impl StructuredLog for SourceFailed<'_> {
    fn log(&self) {
        tracing::error!(
            source = self.source,
            error = %self.error,
            "{}", self
        );
    }
}
