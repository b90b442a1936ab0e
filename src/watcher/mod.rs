// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Polling journal watcher and subscriber dispatch.

mod dispatch;
mod options;
mod poller;
mod subscriber;


pub use options::WatchOptions;
pub use poller::JournalWatcher;
pub use subscriber::{callback, Callback};

use crate::observability::messages::{watcher::JoinDeferred, StructuredLog};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

/// Locks `mutex`, recovering the guard if a previous holder panicked.
///
/// Callbacks never run under these locks, and every critical section leaves
/// the protected state consistent.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Joins `handle`, unless it is the calling thread.
///
/// A watcher-owned thread that asks the watcher to stop cannot join itself;
/// its handle is returned instead and the thread exits once its callback returns.
pub(crate) fn join_or_defer(handle: JoinHandle<()>) -> Option<JoinHandle<()>> {
    if handle.thread().id() == thread::current().id() {
        JoinDeferred {
            thread: handle.thread().name().unwrap_or("<unnamed>"),
        }
        .log();
        return Some(handle);
    }
    let _ = handle.join();
    None
}
