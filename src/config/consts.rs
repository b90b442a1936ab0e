// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Default time between size checks (milliseconds)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;
/// Default prefix for poll loop and queue worker thread names
pub const DEFAULT_THREAD_NAME_PREFIX: &str = "JournalWatcher";
/// Journal location relative to the user's home directory
pub const DEFAULT_JOURNAL_DIRECTORY: [&str; 3] =
    ["Saved Games", "Frontier Developments", "Elite Dangerous"];
