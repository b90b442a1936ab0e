// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Line-oriented event sources.
//!
//! An [`EventSource`] is the capability set the watcher needs from a growing,
//! append-only journal: open/close, current size and offset, repositioning, and
//! reading the next complete line. [`JournalFile`] reads a real file;
//! [`MemorySource`] is an in-memory double whose contents can be appended to
//! from another thread.

pub mod directory;
mod file;
mod memory;
mod reader;

pub use directory::{ActiveJournal, JournalDirectory};
pub use file::JournalFile;
pub use memory::{MemoryAppender, MemorySource};
pub use reader::{Checkpoint, JournalReader};

use crate::errors::SourceResult;

pub trait EventSource: Send + 'static {
    /// Short name used in thread names and log messages.
    fn name(&self) -> &str;

    fn open(&mut self) -> SourceResult<()>;

    /// Releases the underlying handle. Closing a closed source does nothing.
    fn close(&mut self);

    fn is_open(&self) -> bool;

    /// Current total size in bytes, including any partial trailing line.
    fn size(&self) -> SourceResult<u64>;

    /// Byte offset of the next unread line. Zero while closed.
    fn position(&self) -> u64;

    fn seek(&mut self, position: u64) -> SourceResult<()>;

    /// Reads the next newline-terminated line as raw bytes, without its terminator.
    ///
    /// Returns `Ok(None)` when no complete line is available yet. A partial
    /// trailing line is left unread until its newline arrives. Decoding is the
    /// reader's job, so an undecodable line costs only that line.
    fn read_line(&mut self) -> SourceResult<Option<Vec<u8>>>;
}

/// Strips a trailing `\n` or `\r\n`.
pub(crate) fn trim_line_ending(mut line: Vec<u8>) -> Vec<u8> {
    if line.last() == Some(&b'\n') {
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }
    line
}
