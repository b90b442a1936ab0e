// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::{SourceError, SourceResult};
use crate::source::{trim_line_ending, EventSource};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Buffer = Arc<Mutex<Vec<u8>>>;

fn lock(buffer: &Buffer) -> MutexGuard<'_, Vec<u8>> {
    buffer.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Growable in-memory journal.
///
/// Contents are shared with every [`MemoryAppender`] handed out, so a test can
/// keep writing after the source has moved into a watcher.
#[derive(Debug)]
pub struct MemorySource {
    name: String,
    buffer: Buffer,
    position: u64,
    open: bool,
}

/// Write handle for a [`MemorySource`].
#[derive(Debug, Clone)]
pub struct MemoryAppender {
    buffer: Buffer,
}

impl MemoryAppender {
    /// Appends raw text; no newline is added.
    pub fn append(&self, text: &str) {
        lock(&self.buffer).extend_from_slice(text.as_bytes());
    }

    /// Appends raw bytes, which need not be UTF-8.
    pub fn append_bytes(&self, bytes: &[u8]) {
        lock(&self.buffer).extend_from_slice(bytes);
    }

    /// Appends `line` followed by a newline.
    pub fn append_line(&self, line: &str) {
        let mut buffer = lock(&self.buffer);
        buffer.extend_from_slice(line.as_bytes());
        buffer.push(b'\n');
    }

    pub fn len(&self) -> usize {
        lock(&self.buffer).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MemorySource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            buffer: Buffer::default(),
            position: 0,
            open: false,
        }
    }

    /// A source holding `lines`, each terminated by a newline.
    pub fn with_lines<I, L>(name: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        let source = Self::new(name);
        let appender = source.appender();
        for line in lines {
            appender.append_line(line.as_ref());
        }
        source
    }

    pub fn appender(&self) -> MemoryAppender {
        MemoryAppender {
            buffer: Arc::clone(&self.buffer),
        }
    }

    fn ensure_open(&self) -> SourceResult<()> {
        if self.open {
            Ok(())
        } else {
            Err(SourceError::Closed)
        }
    }
}

impl EventSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&mut self) -> SourceResult<()> {
        self.open = true;
        self.position = 0;
        Ok(())
    }

    fn close(&mut self) {
        self.open = false;
        self.position = 0;
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn size(&self) -> SourceResult<u64> {
        self.ensure_open()?;
        Ok(lock(&self.buffer).len() as u64)
    }

    fn position(&self) -> u64 {
        self.position
    }

    fn seek(&mut self, position: u64) -> SourceResult<()> {
        self.ensure_open()?;
        self.position = position;
        Ok(())
    }

    fn read_line(&mut self) -> SourceResult<Option<Vec<u8>>> {
        self.ensure_open()?;
        let buffer = lock(&self.buffer);

        let Some(unread) = usize::try_from(self.position)
            .ok()
            .and_then(|start| buffer.get(start..))
        else {
            return Ok(None);
        };
        let Some(end) = unread.iter().position(|b| *b == b'\n') else {
            return Ok(None);
        };

        let line = unread[..=end].to_vec();
        drop(buffer);
        self.position += line.len() as u64;
        Ok(Some(trim_line_ending(line)))
    }
}
