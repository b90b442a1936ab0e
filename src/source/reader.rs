// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::{RecordError, SourceError, SourceResult};
use crate::events::{Event, MessageResolver};
use crate::observability::messages::{parsing::HeaderNegotiated, StructuredLog};
use crate::parsing::{Header, RecordParser};
use crate::schema::VersionResolver;
use crate::source::EventSource;

/// Saved read position of a [`JournalReader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    position: u64,
    line: u64,
}

/// An [`EventSource`] paired with the parser negotiated from its header.
#[derive(Debug)]
pub struct JournalReader<S: EventSource> {
    source: S,
    versions: VersionResolver,
    messages: MessageResolver,
    keep_raw: bool,
    parser: Option<RecordParser>,
    line: u64,
}

impl<S: EventSource> JournalReader<S> {
    pub fn new(source: S, versions: VersionResolver, messages: MessageResolver) -> Self {
        Self {
            source,
            versions,
            messages,
            keep_raw: false,
            parser: None,
            line: 0,
        }
    }

    /// Retain each line's raw text on the events it produces.
    pub fn with_keep_raw(mut self, keep_raw: bool) -> Self {
        self.keep_raw = keep_raw;
        self
    }

    pub fn name(&self) -> &str {
        self.source.name()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn is_open(&self) -> bool {
        self.source.is_open() && self.parser.is_some()
    }

    /// The parser negotiated at open time.
    pub fn parser(&self) -> Option<&RecordParser> {
        self.parser.as_ref()
    }

    /// Line number of the last line read; 0 before the first.
    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn size(&self) -> SourceResult<u64> {
        self.source.size()
    }

    pub fn position(&self) -> u64 {
        self.source.position()
    }

    /// Opens the source and negotiates schema versions from its header.
    ///
    /// Leaves the reader positioned before the header so the header itself is
    /// delivered as the first record. Opening an open reader does nothing.
    pub fn open(&mut self) -> SourceResult<()> {
        if self.is_open() {
            return Ok(());
        }

        self.source.open()?;
        match self.negotiate() {
            Ok(parser) => {
                self.parser = Some(parser);
                self.line = 0;
                Ok(())
            }
            Err(e) => {
                self.source.close();
                Err(e)
            }
        }
    }

    fn negotiate(&mut self) -> SourceResult<RecordParser> {
        self.source.seek(0)?;
        let bytes = self.source.read_line()?.ok_or_else(|| SourceError::InvalidHeader {
            reason: "no complete header line".to_string(),
        })?;
        let line = String::from_utf8(bytes).map_err(|e| SourceError::InvalidHeader {
            reason: format!("header line is not valid UTF-8: {}", e.utf8_error()),
        })?;
        let header = Header::parse(&line)?;
        let parser =
            RecordParser::for_header(&header, &self.versions, self.messages.clone(), self.keep_raw)?;

        HeaderNegotiated {
            source: self.source.name(),
            gameversion: &header.gameversion,
            build: &header.build,
            canonical: parser.canonical_version(),
            compatible: parser.compatible_versions(),
        }
        .log();

        self.source.seek(0)?;
        Ok(parser)
    }

    pub fn close(&mut self) {
        self.source.close();
        self.parser = None;
        self.line = 0;
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            position: self.source.position(),
            line: self.line,
        }
    }

    pub fn restore(&mut self, checkpoint: Checkpoint) -> SourceResult<()> {
        self.source.seek(checkpoint.position)?;
        self.line = checkpoint.line;
        Ok(())
    }

    /// Moves back to the header line.
    pub fn rewind(&mut self) -> SourceResult<()> {
        self.restore(Checkpoint { position: 0, line: 0 })
    }

    /// Reads past every complete line currently available without parsing it.
    ///
    /// Line numbers keep counting, so later warnings still name the right line.
    pub fn skip_to_end(&mut self) -> SourceResult<u64> {
        self.ensure_open()?;
        let mut skipped = 0;
        while self.source.read_line()?.is_some() {
            self.line += 1;
            skipped += 1;
        }
        Ok(skipped)
    }

    /// Reads and parses the next complete line.
    ///
    /// The outer `Result` is fatal for the source; the inner one only for that line.
    pub fn next_record(&mut self) -> SourceResult<Option<(u64, Result<Event, RecordError>)>> {
        self.ensure_open()?;
        let Some(bytes) = self.source.read_line()? else {
            return Ok(None);
        };
        self.line += 1;

        let parser = self.parser.as_ref().ok_or(SourceError::Closed)?;
        let parsed = match String::from_utf8(bytes) {
            Ok(text) => parser.parse_line(&text, self.line),
            Err(e) => Err(RecordError::InvalidUtf8 {
                reason: e.utf8_error().to_string(),
            }),
        };
        Ok(Some((self.line, parsed)))
    }

    fn ensure_open(&self) -> SourceResult<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(SourceError::Closed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventTypeRegistry;
    use crate::schema::BASELINE_V2_2_02;
    use crate::source::MemorySource;
    use std::sync::Arc;

    const HEADER: &str = r#"{"timestamp":"2017-01-01T00:00:00Z","event":"Fileheader","gameversion":"2.2","build":"r126898/r0"}"#;
    const UNDOCKED: &str = r#"{"timestamp":"2017-01-01T00:00:05Z","event":"Undocked","StationName":"Jameson Memorial"}"#;

    fn reader(source: MemorySource) -> JournalReader<MemorySource> {
        JournalReader::new(
            source,
            VersionResolver::default(),
            MessageResolver::new(Arc::new(EventTypeRegistry::builtin())),
        )
    }

    #[test]
    fn test_open_negotiates_and_rewinds() {
        let mut reader = reader(MemorySource::with_lines("mem", [HEADER, UNDOCKED]));
        reader.open().unwrap();

        let parser = reader.parser().unwrap();
        assert_eq!(parser.canonical_version(), BASELINE_V2_2_02);
        assert_eq!(reader.position(), 0);

        let (line, header) = reader.next_record().unwrap().unwrap();
        assert_eq!(line, 1);
        assert_eq!(header.unwrap().event_type(), "Fileheader");

        let (line, undocked) = reader.next_record().unwrap().unwrap();
        assert_eq!(line, 2);
        assert_eq!(undocked.unwrap().event_type(), "Undocked");

        assert!(reader.next_record().unwrap().is_none());
    }

    #[test]
    fn test_bad_line_is_per_record() {
        let mut reader = reader(MemorySource::with_lines("mem", [HEADER, "{\"timest", UNDOCKED]));
        reader.open().unwrap();
        reader.skip_to_end().unwrap();
        reader.rewind().unwrap();

        let results: Vec<_> = std::iter::from_fn(|| reader.next_record().unwrap())
            .map(|(line, result)| (line, result.is_ok()))
            .collect();
        assert_eq!(results, vec![(1, true), (2, false), (3, true)]);
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let source = MemorySource::with_lines("mem", [HEADER]);
        let appender = source.appender();
        appender.append_bytes(b"{\"timestamp\":\"2017-01-01T00:00:05Z\",\"event\":\"Undocked\",\"StationName\":\"Jame\xFFson\"}\n");
        appender.append_line(UNDOCKED);

        let mut reader = reader(source);
        reader.open().unwrap();
        reader.next_record().unwrap();

        let (line, corrupt) = reader.next_record().unwrap().unwrap();
        assert_eq!(line, 2);
        assert!(matches!(corrupt, Err(RecordError::InvalidUtf8 { .. })));

        let (line, next) = reader.next_record().unwrap().unwrap();
        assert_eq!(line, 3);
        assert_eq!(next.unwrap().data()["StationName"], "Jameson Memorial");
    }

    #[test]
    fn test_invalid_utf8_header_is_rejected() {
        let source = MemorySource::new("bad-header");
        source.appender().append_bytes(b"{\"gameversion\":\"2.2\xFE\"}\n");
        let mut reader = reader(source);
        assert!(matches!(reader.open(), Err(SourceError::InvalidHeader { .. })));
        assert!(!reader.is_open());
    }

    #[test]
    fn test_header_failures_close_source() {
        let cases = [
            MemorySource::new("empty"),
            MemorySource::with_lines("no-version", [UNDOCKED]),
            MemorySource::with_lines(
                "bad-version",
                [r#"{"timestamp":"2017-01-01T00:00:00Z","event":"Fileheader","gameversion":"next","build":"r1/r0"}"#],
            ),
        ];

        for source in cases {
            let name = source.name().to_string();
            let mut reader = reader(source);
            let err = reader.open().unwrap_err();
            assert!(
                matches!(err, SourceError::InvalidHeader { .. } | SourceError::Version(_)),
                "{}: {:?}",
                name,
                err
            );
            assert!(!reader.is_open(), "{}", name);
            assert!(!reader.source().is_open(), "{}", name);
        }
    }

    #[test]
    fn test_partial_header_is_not_a_header() {
        let source = MemorySource::new("partial");
        source.appender().append(HEADER);
        let mut reader = reader(source);
        assert!(matches!(reader.open(), Err(SourceError::InvalidHeader { .. })));
    }

    #[test]
    fn test_skip_to_end_counts_lines() {
        let source = MemorySource::with_lines("mem", [HEADER, UNDOCKED]);
        let appender = source.appender();
        let mut reader = reader(source);
        reader.open().unwrap();

        assert_eq!(reader.skip_to_end().unwrap(), 2);
        assert_eq!(reader.line(), 2);

        appender.append_line(UNDOCKED);
        let (line, _) = reader.next_record().unwrap().unwrap();
        assert_eq!(line, 3);
    }

    #[test]
    fn test_checkpoint_restore() {
        let mut reader = reader(MemorySource::with_lines("mem", [HEADER, UNDOCKED, UNDOCKED]));
        reader.open().unwrap();
        reader.next_record().unwrap();
        let checkpoint = reader.checkpoint();

        reader.skip_to_end().unwrap();
        reader.restore(checkpoint).unwrap();
        assert_eq!(reader.next_record().unwrap().unwrap().0, 2);
    }

    #[test]
    fn test_closed_reader() {
        let mut reader = reader(MemorySource::with_lines("mem", [HEADER]));
        assert!(matches!(reader.next_record(), Err(SourceError::Closed)));
        reader.open().unwrap();
        reader.close();
        assert!(matches!(reader.next_record(), Err(SourceError::Closed)));
        assert!(matches!(reader.skip_to_end(), Err(SourceError::Closed)));
    }
}
