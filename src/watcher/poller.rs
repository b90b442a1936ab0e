// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The polling watcher.
//!
//! ```text
//!            start()                  stop()
//!   Idle ────────────► Running ────────────► Stopping ──► Idle
//!    │  ▲
//!    │  └──── read_all_sync() returns
//!    └──────► Replaying
//! ```
//!
//! While running, one thread (`<prefix>-<source>`) owns the source position.
//! Each iteration compares the source size with the last known size, reads and
//! dispatches every new complete line in file order, then waits for the rest of
//! the poll interval. The wait ends early on `check_for_data` or `stop`.

use crate::errors::{SourceError, SourceResult, WatcherError};
use crate::events::{EventFilter, EventTypeRegistry, MessageResolver};
use crate::observability::messages::parsing::LineParseFailed;
use crate::observability::messages::watcher::{
    GrowthDetected, ReplayCompleted, ReplayStarted, SourceFailed, WatcherStarted, WatcherStopped,
};
use crate::observability::messages::StructuredLog;
use crate::schema::VersionResolver;
use crate::source::{EventSource, JournalFile, JournalReader};
use crate::watcher::dispatch::Dispatcher;
use crate::watcher::{join_or_defer, lock, Callback, WatchOptions};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;
use tracing::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Running,
    Stopping,
    Replaying,
}

struct PollHandle {
    thread: JoinHandle<()>,
    cancel: CancellationToken,
}

struct Control {
    phase: Phase,
    poll: Option<PollHandle>,
    /// Poll thread whose join was deferred because it stopped itself
    lingering: Option<JoinHandle<()>>,
}

/// Watches one journal source and dispatches its events to subscribers.
///
/// Every method takes `&self`; share the watcher through an `Arc` to control it
/// from callbacks. Dropping a running watcher does not stop it: call
/// [`stop`](Self::stop) first.
pub struct JournalWatcher<S: EventSource = JournalFile> {
    reader: Arc<Mutex<JournalReader<S>>>,
    dispatcher: Arc<Dispatcher>,
    options: WatchOptions,
    source_name: String,
    control: Mutex<Control>,
    running: AtomicBool,
    wake: Arc<Notify>,
    failure: Arc<Mutex<Option<SourceError>>>,
}

impl JournalWatcher<JournalFile> {
    /// A watcher over the journal file at `path`, using the built-in version table.
    pub fn from_path(
        path: impl Into<PathBuf>,
        registry: Arc<EventTypeRegistry>,
        options: WatchOptions,
    ) -> Self {
        let reader = JournalReader::new(
            JournalFile::new(path),
            VersionResolver::default(),
            MessageResolver::new(registry),
        )
        .with_keep_raw(options.keep_raw);
        Self::new(reader, options)
    }
}

impl<S: EventSource> JournalWatcher<S> {
    pub fn new(reader: JournalReader<S>, options: WatchOptions) -> Self {
        let source_name = reader.name().to_string();
        Self {
            reader: Arc::new(Mutex::new(reader)),
            dispatcher: Arc::new(Dispatcher::new(options.thread_name_prefix.clone())),
            options,
            source_name,
            control: Mutex::new(Control {
                phase: Phase::Idle,
                poll: None,
                lingering: None,
            }),
            running: AtomicBool::new(false),
            wake: Arc::new(Notify::new()),
            failure: Arc::default(),
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn options(&self) -> &WatchOptions {
        &self.options
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn is_open(&self) -> bool {
        lock(&self.reader).is_open()
    }

    /// Number of named queues currently registered.
    pub fn queue_count(&self) -> usize {
        self.dispatcher.queue_count()
    }

    /// Opens the source and negotiates its schema versions.
    pub fn open(&self) -> Result<(), WatcherError> {
        self.ensure_idle("open")?;
        lock(&self.reader).open()?;
        Ok(())
    }

    pub fn close(&self) -> Result<(), WatcherError> {
        self.ensure_idle("close")?;
        lock(&self.reader).close();
        Ok(())
    }

    /// The fatal source error that ended the poll loop, if any.
    pub fn take_failure(&self) -> Option<SourceError> {
        lock(&self.failure).take()
    }

    /// Registers `callback` for events matching `filter`.
    ///
    /// Without a queue the callback runs on the poll thread and delays polling
    /// for as long as it runs. A named queue is created on first use and, if
    /// the watcher is running, starts consuming immediately.
    pub fn add_callback(
        &self,
        filter: impl Into<EventFilter>,
        callback: Callback,
        queue: Option<&str>,
    ) -> Result<(), WatcherError> {
        self.dispatcher
            .subscribe(filter.into(), callback, queue.map(str::to_string))
    }

    /// Removes every registration of `callback` and tears down queues left empty.
    ///
    /// Returns the number of registrations removed.
    pub fn remove_callback(&self, callback: &Callback) -> usize {
        self.dispatcher.unsubscribe(callback)
    }

    /// Starts the poll loop and all queue workers.
    ///
    /// Returns `Ok(false)` if the watcher is not idle. Opens the source if it is
    /// not open yet; a source opened here is closed again by [`stop`](Self::stop).
    pub fn start(&self) -> Result<bool, WatcherError> {
        if !self.reap_lingering() {
            return Ok(false);
        }
        let mut control = lock(&self.control);
        if control.phase != Phase::Idle {
            return Ok(false);
        }

        let (opened_here, known_size) = self.position_for_start()?;
        let abort = |error: WatcherError| {
            self.running.store(false, Ordering::SeqCst);
            self.dispatcher.stop_all();
            if opened_here {
                lock(&self.reader).close();
            }
            Err(error)
        };

        *lock(&self.failure) = None;
        self.running.store(true, Ordering::SeqCst);
        if let Err(e) = self.dispatcher.start_all() {
            return abort(e);
        }

        let started = WatcherStarted {
            source: &self.source_name,
            from_start: self.options.from_start,
            poll_interval: self.options.poll_interval,
            queue_count: self.dispatcher.queue_count(),
        };
        started.log();
        let span = started.span("poll");

        let cancel = CancellationToken::new();
        let poll_loop = PollLoop {
            reader: Arc::clone(&self.reader),
            dispatcher: Arc::clone(&self.dispatcher),
            wake: Arc::clone(&self.wake),
            cancel: cancel.clone(),
            failure: Arc::clone(&self.failure),
            source: self.source_name.clone(),
            poll_interval: self.options.poll_interval,
            known_size,
            close_on_exit: opened_here,
        };
        let name = format!("{}-{}", self.options.thread_name_prefix, self.source_name);
        let thread = match thread::Builder::new()
            .name(name.clone())
            .spawn(move || poll_loop.run(span))
        {
            Ok(thread) => thread,
            Err(source) => return abort(WatcherError::Spawn { name, source }),
        };

        control.phase = Phase::Running;
        control.poll = Some(PollHandle { thread, cancel });
        Ok(true)
    }

    /// Opens if needed and positions the reader per `from_start`.
    fn position_for_start(&self) -> Result<(bool, u64), WatcherError> {
        let mut reader = lock(&self.reader);
        let opened_here = !reader.is_open();
        reader.open()?;

        let positioned = if self.options.from_start {
            reader.rewind()
        } else {
            reader.skip_to_end().map(|_| ())
        };
        if let Err(e) = positioned {
            if opened_here {
                reader.close();
            }
            return Err(e.into());
        }
        Ok((opened_here, reader.position()))
    }

    /// Stops the poll loop, then every queue worker.
    ///
    /// Returns `false` if the watcher was not running. Safe to call from a
    /// callback: the calling thread is not joined, it exits once the callback
    /// returns.
    pub fn stop(&self) -> bool {
        let poll = {
            let mut control = lock(&self.control);
            if control.phase != Phase::Running {
                return false;
            }
            control.phase = Phase::Stopping;
            control.poll.take()
        };
        self.running.store(false, Ordering::SeqCst);

        let lingering = poll.and_then(|poll| {
            poll.cancel.cancel();
            join_or_defer(poll.thread)
        });
        let queue_count = self.dispatcher.stop_all();

        {
            let mut control = lock(&self.control);
            control.lingering = lingering;
            control.phase = Phase::Idle;
        }
        WatcherStopped {
            source: &self.source_name,
            queue_count,
        }
        .log();
        true
    }

    /// Wakes the poll loop for an immediate size check.
    ///
    /// Returns whether the watcher was running.
    pub fn check_for_data(&self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.wake.notify_one();
        true
    }

    /// Replays the whole source on the calling thread, then restores the read position.
    ///
    /// Every matching subscriber runs inline, queued ones included. Returns
    /// `Ok(false)` unless the watcher is idle.
    pub fn read_all_sync(&self) -> Result<bool, WatcherError> {
        if !self.reap_lingering() {
            return Ok(false);
        }
        {
            let mut control = lock(&self.control);
            if control.phase != Phase::Idle {
                return Ok(false);
            }
            control.phase = Phase::Replaying;
        }

        let result = self.replay();
        lock(&self.control).phase = Phase::Idle;
        result.map(|_| true)
    }

    fn replay(&self) -> Result<usize, WatcherError> {
        let started_at = Instant::now();
        let started = ReplayStarted {
            source: &self.source_name,
        };
        started.log();
        let span = started.span("replay");
        let _entered = span.enter();

        let (opened_here, checkpoint) = {
            let mut reader = lock(&self.reader);
            let opened_here = !reader.is_open();
            reader.open()?;
            let checkpoint = reader.checkpoint();
            if let Err(e) = reader.rewind() {
                if opened_here {
                    reader.close();
                }
                return Err(e.into());
            }
            (opened_here, checkpoint)
        };

        let drained = drain(&self.reader, &self.dispatcher, &self.source_name, false, None);

        let restored = {
            let mut reader = lock(&self.reader);
            if opened_here {
                reader.close();
                Ok(())
            } else {
                reader.restore(checkpoint)
            }
        };
        let records = drained?;
        restored?;

        ReplayCompleted {
            source: &self.source_name,
            records,
            duration: started_at.elapsed(),
        }
        .log();
        Ok(records)
    }

    fn ensure_idle(&self, operation: &'static str) -> Result<(), WatcherError> {
        self.reap_lingering();
        if lock(&self.control).phase != Phase::Idle {
            return Err(WatcherError::Running { operation });
        }
        Ok(())
    }

    /// Joins a poll thread left behind by a stop issued from that thread.
    ///
    /// Returns `false` when called from that very thread.
    fn reap_lingering(&self) -> bool {
        let Some(handle) = lock(&self.control).lingering.take() else {
            return true;
        };
        if handle.thread().id() == thread::current().id() {
            lock(&self.control).lingering = Some(handle);
            return false;
        }
        let _ = handle.join();
        true
    }
}

/// Reads every available record and dispatches it in file order.
fn drain<S: EventSource>(
    reader: &Mutex<JournalReader<S>>,
    dispatcher: &Dispatcher,
    source: &str,
    queued: bool,
    cancel: Option<&CancellationToken>,
) -> SourceResult<usize> {
    let mut records = 0;
    while !cancel.is_some_and(CancellationToken::is_cancelled) {
        let next = lock(reader).next_record()?;
        let Some((line, parsed)) = next else {
            break;
        };
        match parsed {
            Ok(event) => {
                dispatcher.dispatch(Arc::new(event), queued);
                records += 1;
            }
            Err(error) => LineParseFailed {
                source,
                line,
                error: &error,
            }
            .log(),
        }
    }
    Ok(records)
}

/// State owned by the poll thread.
struct PollLoop<S: EventSource> {
    reader: Arc<Mutex<JournalReader<S>>>,
    dispatcher: Arc<Dispatcher>,
    wake: Arc<Notify>,
    cancel: CancellationToken,
    failure: Arc<Mutex<Option<SourceError>>>,
    source: String,
    poll_interval: Duration,
    known_size: u64,
    close_on_exit: bool,
}

impl<S: EventSource> PollLoop<S> {
    fn run(mut self, span: Span) {
        let _entered = span.enter();

        if let Err(error) = self.poll() {
            SourceFailed {
                source: &self.source,
                error: &error,
            }
            .log();
            *lock(&self.failure) = Some(error);
        }

        if self.close_on_exit {
            lock(&self.reader).close();
        }
    }

    fn poll(&mut self) -> SourceResult<()> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;

        while !self.cancel.is_cancelled() {
            let iteration = Instant::now();
            self.poll_once()?;

            let remaining = self.poll_interval.saturating_sub(iteration.elapsed());
            if remaining.is_zero() {
                thread::yield_now();
                continue;
            }

            let (cancel, wake) = (&self.cancel, &self.wake);
            runtime.block_on(async {
                tokio::select! {
                    _ = tokio::time::sleep(remaining) => {}
                    _ = cancel.cancelled() => {}
                    _ = wake.notified() => {}
                }
            });
        }
        Ok(())
    }

    fn poll_once(&mut self) -> SourceResult<()> {
        let size = lock(&self.reader).size()?;
        if size > self.known_size {
            let records = drain(
                &self.reader,
                &self.dispatcher,
                &self.source,
                true,
                Some(&self.cancel),
            )?;
            GrowthDetected {
                source: &self.source,
                previous_size: self.known_size,
                new_size: size,
                records,
            }
            .log();
        }
        self.known_size = size;
        Ok(())
    }
}
