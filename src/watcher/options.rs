// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_THREAD_NAME_PREFIX};
use std::time::Duration;

/// Construction options for a [`JournalWatcher`](crate::watcher::JournalWatcher).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchOptions {
    /// Replay from offset 0 on start; otherwise only lines written after start are delivered.
    pub from_start: bool,
    /// Upper bound on the time between size checks. Zero polls without waiting.
    pub poll_interval: Duration,
    /// Retain raw line text on events. Applied by
    /// [`JournalWatcher::from_path`](crate::watcher::JournalWatcher::from_path);
    /// a reader passed to `new` keeps its own setting.
    pub keep_raw: bool,
    pub thread_name_prefix: String,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            from_start: true,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            keep_raw: false,
            thread_name_prefix: DEFAULT_THREAD_NAME_PREFIX.to_string(),
        }
    }
}

impl WatchOptions {
    pub fn with_from_start(mut self, from_start: bool) -> Self {
        self.from_start = from_start;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_keep_raw(mut self, keep_raw: bool) -> Self {
        self.keep_raw = keep_raw;
        self
    }

    pub fn with_thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }
}
