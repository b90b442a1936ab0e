// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Locating the journal currently being written.
//!
//! The game writes one `Journal.<timestamp>.<part>.log` file per session part
//! into a single directory. Deciding when to switch to a newer file, and
//! swapping watchers, is left to the caller.

use std::io;
use std::path::{Path, PathBuf};

/// Supplies the path of the journal currently being written.
pub trait ActiveJournal {
    /// `Ok(None)` when there is no journal yet.
    fn current(&self) -> io::Result<Option<PathBuf>>;
}

/// A journal directory; the active journal is the newest `Journal.*.log` by name.
#[derive(Debug, Clone)]
pub struct JournalDirectory {
    root: PathBuf,
}

impl JournalDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn is_journal_name(name: &str) -> bool {
    name.len() > "Journal..log".len() && name.starts_with("Journal.") && name.ends_with(".log")
}

impl ActiveJournal for JournalDirectory {
    fn current(&self) -> io::Result<Option<PathBuf>> {
        let mut newest: Option<(String, PathBuf)> = None;

        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !is_journal_name(&name) {
                continue;
            }
            if newest.as_ref().map_or(true, |(best, _)| name > *best) {
                newest = Some((name, entry.path()));
            }
        }

        Ok(newest.map(|(_, path)| path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_newest_journal_by_name() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "Journal.170101000000.01.log",
            "Journal.170102093000.01.log",
            "Journal.170102093000.02.log",
            "Journal..log",
            "Journal.180101000000.01.txt",
            "Status.json",
        ] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("Journal.990101000000.01.log")).unwrap();

        let journals = JournalDirectory::new(dir.path());
        assert_eq!(
            journals.current().unwrap(),
            Some(dir.path().join("Journal.170102093000.02.log"))
        );
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(JournalDirectory::new(dir.path()).current().unwrap(), None);
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let journals = JournalDirectory::new(dir.path().join("absent"));
        assert!(journals.current().is_err());
    }
}
