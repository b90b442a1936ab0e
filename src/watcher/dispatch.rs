// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Subscriber table and named dispatch queues.
//!
//! ```text
//! dispatch(event)
//!     │
//!     ├──► inline subscribers ──────────────► callback(event)   (dispatching thread)
//!     ├──► [queue "a"] ──► worker "<prefix>-Qa" ──► matching "a" callbacks, in order
//!     └──► [queue "b"] ──► worker "<prefix>-Qb" ──► matching "b" callbacks, in order
//! ```
//!
//! An event is enqueued at most once per queue. The worker picks the callbacks
//! to run from the live table when it dequeues, so a callback removed before
//! that point is never invoked. Queues are serialized internally and
//! independent of each other and of the dispatching thread.
//!
//! A worker exits when its queue is stopped; events still buffered at that
//! point are discarded.

use crate::errors::WatcherError;
use crate::events::{Event, EventFilter};
use crate::observability::messages::queue::{
    QueueCreated, QueueStarted, QueueStopped, QueueUnused, INLINE_QUEUE,
};
use crate::observability::messages::StructuredLog;
use crate::watcher::subscriber::{invoke, same_callback, Callback, Subscriber};
use crate::watcher::{join_or_defer, lock};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use tokio::sync::mpsc;

enum QueueMessage {
    Event(Arc<Event>),
    Stop,
}

/// Handle to a running queue worker.
struct Worker {
    sender: mpsc::UnboundedSender<QueueMessage>,
    running: Arc<AtomicBool>,
    thread: JoinHandle<()>,
}

impl Worker {
    fn signal_stop(self) -> JoinHandle<()> {
        self.running.store(false, Ordering::SeqCst);
        let _ = self.sender.send(QueueMessage::Stop);
        self.thread
    }
}

#[derive(Default)]
struct Table {
    subscribers: Vec<Subscriber>,
    /// Queue name -> worker, `None` while the dispatcher is inactive
    queues: BTreeMap<String, Option<Worker>>,
    /// Whether queues should have live workers
    active: bool,
}

impl Table {
    fn unused_queues(&self) -> Vec<String> {
        self.queues
            .keys()
            .filter(|name| !self.subscribers.iter().any(|s| s.is_on(name)))
            .cloned()
            .collect()
    }
}

pub(crate) struct Dispatcher {
    table: Arc<Mutex<Table>>,
    thread_name_prefix: String,
}

impl Dispatcher {
    pub fn new(thread_name_prefix: impl Into<String>) -> Self {
        Self {
            table: Arc::default(),
            thread_name_prefix: thread_name_prefix.into(),
        }
    }

    pub fn queue_count(&self) -> usize {
        lock(&self.table).queues.len()
    }

    /// Registers a subscriber, creating (and, if active, starting) its queue.
    pub fn subscribe(
        &self,
        filter: EventFilter,
        callback: Callback,
        queue: Option<String>,
    ) -> Result<(), WatcherError> {
        let mut table = lock(&self.table);

        if let Some(name) = &queue {
            if !table.queues.contains_key(name) {
                QueueCreated { queue: name }.log();
                let worker = if table.active {
                    Some(self.spawn_worker(name)?)
                } else {
                    None
                };
                table.queues.insert(name.clone(), worker);
            }
        }

        table.subscribers.push(Subscriber {
            filter,
            callback,
            queue,
        });
        Ok(())
    }

    /// Removes every registration of `callback`, then tears down queues left
    /// without subscribers. Returns the number of registrations removed.
    pub fn unsubscribe(&self, callback: &Callback) -> usize {
        let (removed, stopping) = {
            let mut table = lock(&self.table);
            let before = table.subscribers.len();
            table.subscribers.retain(|s| !same_callback(&s.callback, callback));
            let removed = before - table.subscribers.len();

            let mut stopping = Vec::new();
            for name in table.unused_queues() {
                QueueUnused { queue: &name }.log();
                if let Some(Some(worker)) = table.queues.remove(&name) {
                    stopping.push(worker.signal_stop());
                }
            }
            (removed, stopping)
        };

        for thread in stopping {
            join_or_defer(thread);
        }
        removed
    }

    /// Starts a worker for every queue.
    pub fn start_all(&self) -> Result<(), WatcherError> {
        let mut table = lock(&self.table);
        table.active = true;

        let idle: Vec<String> = table
            .queues
            .iter()
            .filter(|(_, worker)| worker.is_none())
            .map(|(name, _)| name.clone())
            .collect();
        for name in idle {
            let worker = self.spawn_worker(&name)?;
            table.queues.insert(name, Some(worker));
        }
        Ok(())
    }

    /// Stops and joins every worker. Queues and subscribers stay registered.
    pub fn stop_all(&self) -> usize {
        let stopping: Vec<JoinHandle<()>> = {
            let mut table = lock(&self.table);
            table.active = false;
            table
                .queues
                .values_mut()
                .filter_map(Option::take)
                .map(Worker::signal_stop)
                .collect()
        };

        let count = stopping.len();
        for thread in stopping {
            join_or_defer(thread);
        }
        count
    }

    /// Delivers one event. With `queued` false every subscriber runs inline.
    pub fn dispatch(&self, event: Arc<Event>, queued: bool) {
        let mut inline = Vec::new();
        {
            let table = lock(&self.table);
            let mut enqueued: Vec<&str> = Vec::new();

            for subscriber in table.subscribers.iter().filter(|s| s.matches(&event)) {
                let target = match (&subscriber.queue, queued) {
                    (Some(name), true) => table
                        .queues
                        .get(name)
                        .and_then(Option::as_ref)
                        .map(|worker| (name.as_str(), worker)),
                    _ => None,
                };

                match target {
                    Some((name, worker)) => {
                        if !enqueued.contains(&name) {
                            enqueued.push(name);
                            let _ = worker.sender.send(QueueMessage::Event(Arc::clone(&event)));
                        }
                    }
                    None => inline.push(Arc::clone(&subscriber.callback)),
                }
            }
        }

        for callback in &inline {
            invoke(INLINE_QUEUE, callback, &event);
        }
    }

    fn spawn_worker(&self, queue: &str) -> Result<Worker, WatcherError> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let running = Arc::new(AtomicBool::new(true));
        let name = format!("{}-Q{}", self.thread_name_prefix, queue);

        let worker = QueueWorker {
            queue: queue.to_string(),
            table: Arc::clone(&self.table),
            running: Arc::clone(&running),
            receiver,
        };
        let thread = thread::Builder::new()
            .name(name.clone())
            .spawn(move || worker.run())
            .map_err(|source| WatcherError::Spawn { name, source })?;

        Ok(Worker {
            sender,
            running,
            thread,
        })
    }
}

struct QueueWorker {
    queue: String,
    table: Arc<Mutex<Table>>,
    running: Arc<AtomicBool>,
    receiver: mpsc::UnboundedReceiver<QueueMessage>,
}

impl QueueWorker {
    fn run(mut self) {
        let current = thread::current();
        let started = QueueStarted {
            queue: &self.queue,
            thread: current.name().unwrap_or_default(),
        };
        started.log();
        let span = started.span("queue");
        let _entered = span.enter();

        let mut delivered = 0u64;
        let mut discarded = 0usize;
        while let Some(QueueMessage::Event(event)) = self.receiver.blocking_recv() {
            let Some(callbacks) = self.snapshot(&event) else {
                discarded += 1;
                break;
            };
            for callback in &callbacks {
                invoke(&self.queue, callback, &event);
            }
            delivered += 1;
        }

        self.receiver.close();
        while let Ok(message) = self.receiver.try_recv() {
            if let QueueMessage::Event(_) = message {
                discarded += 1;
            }
        }

        QueueStopped {
            queue: &self.queue,
            delivered,
            discarded,
        }
        .log();
    }

    /// Callbacks on this queue matching `event`, or `None` once the queue is stopping.
    fn snapshot(&self, event: &Event) -> Option<Vec<Callback>> {
        let table = lock(&self.table);
        if !self.running.load(Ordering::SeqCst) {
            return None;
        }
        Some(
            table
                .subscribers
                .iter()
                .filter(|s| s.is_on(&self.queue) && s.matches(event))
                .map(|s| Arc::clone(&s.callback))
                .collect(),
        )
    }
}
