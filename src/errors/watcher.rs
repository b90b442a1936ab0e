// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::SourceError;
use thiserror::Error;

/// Errors surfaced by [`JournalWatcher`](crate::watcher::JournalWatcher) lifecycle calls.
///
/// Returning `Ok(false)` from `start`/`read_all_sync` (already running) is not an
/// error; these variants are reserved for conditions the caller must act on.
#[derive(Error, Debug)]
pub enum WatcherError {
    /// The source could not be opened or read. Reopening is the caller's job.
    #[error("Event source failed: {0}")]
    Source(#[from] SourceError),

    /// The operation requires the watcher to be idle.
    #[error("Watcher is running; stop it before calling {operation}")]
    Running { operation: &'static str },

    /// A worker thread could not be spawned.
    #[error("Failed to spawn worker thread '{name}': {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },
}
