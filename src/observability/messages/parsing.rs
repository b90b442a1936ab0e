// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for header negotiation and record parsing.

use crate::observability::messages::StructuredLog;
use crate::schema::{CompatibleVersionSet, SchemaVersion};
use std::fmt::{Display, Formatter};

/// Header read and schema versions negotiated for a source.
///
/// # Log Level
/// `info!` - Important operational event
pub struct HeaderNegotiated<'a> {
    pub source: &'a str,
    pub gameversion: &'a str,
    pub build: &'a str,
    pub canonical: SchemaVersion,
    pub compatible: &'a CompatibleVersionSet,
}

impl Display for HeaderNegotiated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let compatible: Vec<String> = self.compatible.iter().map(|v| v.to_string()).collect();
        write!(
            f,
            "'{}' reports gameversion '{}' build '{}': schema {}, parsing with [{}]",
            self.source,
            self.gameversion,
            self.build,
            self.canonical,
            compatible.join(", ")
        )
    }
}

impl StructuredLog for HeaderNegotiated<'_> {
    fn log(&self) {
        tracing::info!(
            source = self.source,
            gameversion = self.gameversion,
            build = self.build,
            canonical = %self.canonical,
            newest_schema = %self.compatible.newest(),
            "{}", self
        );
    }
}

/// A line could not be parsed and was skipped.
///
/// # Log Level
/// `warn!` - Recoverable, the watcher keeps going
pub struct LineParseFailed<'a> {
    pub source: &'a str,
    pub line: u64,
    pub error: &'a dyn std::error::Error,
}

impl Display for LineParseFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Failed to parse file {} line {}: {}",
            self.source, self.line, self.error
        )
    }
}

impl StructuredLog for LineParseFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            source = self.source,
            line = self.line,
            error = %self.error,
            "{}", self
        );
    }
}

/// No typed schema for an event type; the generic body was used.
///
/// # Log Level
/// `trace!` - Expected for every event type outside the catalog
pub struct GenericSchemaUsed<'a> {
    pub event_type: &'a str,
    pub version: SchemaVersion,
}

impl Display for GenericSchemaUsed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "No typed schema for '{}', using generic event at {}",
            self.event_type, self.version
        )
    }
}

impl StructuredLog for GenericSchemaUsed<'_> {
    fn log(&self) {
        tracing::trace!(
            event_type = self.event_type,
            version = %self.version,
            "{}", self
        );
    }
}
