// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::{SourceError, SourceResult};
use crate::source::{trim_line_ending, EventSource};
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// A journal file on disk.
#[derive(Debug)]
pub struct JournalFile {
    path: PathBuf,
    name: String,
    reader: Option<BufReader<File>>,
    position: u64,
}

impl JournalFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            path,
            name,
            reader: None,
            position: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn reader(&mut self) -> SourceResult<&mut BufReader<File>> {
        self.reader.as_mut().ok_or(SourceError::Closed)
    }
}

impl EventSource for JournalFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&mut self) -> SourceResult<()> {
        let file = File::open(&self.path)?;
        self.reader = Some(BufReader::new(file));
        self.position = 0;
        Ok(())
    }

    fn close(&mut self) {
        self.reader = None;
        self.position = 0;
    }

    fn is_open(&self) -> bool {
        self.reader.is_some()
    }

    fn size(&self) -> SourceResult<u64> {
        let reader = self.reader.as_ref().ok_or(SourceError::Closed)?;
        Ok(reader.get_ref().metadata()?.len())
    }

    fn position(&self) -> u64 {
        self.position
    }

    fn seek(&mut self, position: u64) -> SourceResult<()> {
        self.reader()?.seek(SeekFrom::Start(position))?;
        self.position = position;
        Ok(())
    }

    fn read_line(&mut self) -> SourceResult<Option<Vec<u8>>> {
        let position = self.position;
        let reader = self.reader()?;

        let mut line = Vec::new();
        let read = reader.read_until(b'\n', &mut line)?;
        if read == 0 {
            return Ok(None);
        }
        if line.last() != Some(&b'\n') {
            // still being written; come back for it
            reader.seek(SeekFrom::Start(position))?;
            return Ok(None);
        }

        self.position += read as u64;
        Ok(Some(trim_line_ending(line)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_reads_complete_lines_only() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "first\r\nsecond\nthi").unwrap();
        file.flush().unwrap();

        let mut source = JournalFile::new(file.path());
        source.open().unwrap();
        assert_eq!(source.size().unwrap(), 17);

        assert_eq!(source.read_line().unwrap().as_deref(), Some(&b"first"[..]));
        assert_eq!(source.read_line().unwrap().as_deref(), Some(&b"second"[..]));
        assert_eq!(source.position(), 14);
        assert_eq!(source.read_line().unwrap(), None);
        assert_eq!(source.position(), 14);

        write!(file, "rd\n").unwrap();
        file.flush().unwrap();
        assert_eq!(source.read_line().unwrap().as_deref(), Some(&b"third"[..]));
        assert_eq!(source.read_line().unwrap(), None);
        assert_eq!(source.position(), source.size().unwrap());
    }

    #[test]
    fn test_seek_and_reread() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "one").unwrap();
        writeln!(file, "two").unwrap();
        file.flush().unwrap();

        let mut source = JournalFile::new(file.path());
        source.open().unwrap();
        source.seek(4).unwrap();
        assert_eq!(source.read_line().unwrap().as_deref(), Some(&b"two"[..]));
        source.seek(0).unwrap();
        assert_eq!(source.read_line().unwrap().as_deref(), Some(&b"one"[..]));
    }

    #[test]
    fn test_closed_source_fails_fast() {
        let file = NamedTempFile::new().unwrap();
        let mut source = JournalFile::new(file.path());

        assert!(!source.is_open());
        assert!(matches!(source.read_line(), Err(SourceError::Closed)));
        assert!(matches!(source.seek(0), Err(SourceError::Closed)));
        assert!(matches!(source.size(), Err(SourceError::Closed)));

        source.open().unwrap();
        source.close();
        source.close();
        assert!(matches!(source.read_line(), Err(SourceError::Closed)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = JournalFile::new(dir.path().join("Journal.missing.log"));
        assert_eq!(source.name(), "Journal.missing.log");
        assert!(matches!(source.open(), Err(SourceError::Io(_))));
    }
}
