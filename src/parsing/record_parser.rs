// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Turns one raw journal line into one typed [`Event`].
//!
//! ```text
//! raw line ──► JSON object ──► timestamp + event ──► MessageResolver ──► constructor ──► Event
//!                  │                  │                                       │
//!          MalformedRecord     MissingField /                          SchemaMismatch
//!                              MalformedTimestamp
//! ```
//!
//! The compatible version set is fixed per source: it is computed once from the
//! header line when the source is opened and never renegotiated.

use crate::errors::{RecordError, SourceError};
use crate::events::{Event, MessageResolver};
use crate::observability::messages::{parsing::GenericSchemaUsed, StructuredLog};
use crate::parsing::Header;
use crate::schema::{CompatibleVersionSet, SchemaVersion, VersionResolver};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

const NAIVE_INSTANT: &str = "%Y-%m-%dT%H:%M:%S%.f";

#[derive(Debug, Clone)]
pub struct RecordParser {
    messages: MessageResolver,
    canonical: SchemaVersion,
    versions: CompatibleVersionSet,
    keep_raw: bool,
}

impl RecordParser {
    pub fn new(
        messages: MessageResolver,
        canonical: SchemaVersion,
        versions: CompatibleVersionSet,
        keep_raw: bool,
    ) -> Self {
        Self {
            messages,
            canonical,
            versions,
            keep_raw,
        }
    }

    /// Negotiates schema versions from a header and builds the parser for that source.
    pub fn for_header(
        header: &Header,
        versions: &VersionResolver,
        messages: MessageResolver,
        keep_raw: bool,
    ) -> Result<Self, SourceError> {
        let canonical = versions.resolve(&header.gameversion, &header.build)?;
        let compatible = versions.compatible_versions(canonical);
        Ok(Self::new(messages, canonical, compatible, keep_raw))
    }

    /// The canonical version negotiated from the header.
    pub fn canonical_version(&self) -> SchemaVersion {
        self.canonical
    }

    pub fn compatible_versions(&self) -> &CompatibleVersionSet {
        &self.versions
    }

    pub fn keeps_raw(&self) -> bool {
        self.keep_raw
    }

    /// Parses `raw` (one line, trailing newline optional) found at 1-based `line`.
    pub fn parse_line(&self, raw: &str, line: u64) -> Result<Event, RecordError> {
        let text = raw.trim_end_matches(['\r', '\n']);

        let value: Value =
            serde_json::from_str(text).map_err(|e| RecordError::MalformedRecord {
                reason: e.to_string(),
            })?;
        let Value::Object(fields) = value else {
            return Err(RecordError::MalformedRecord {
                reason: format!("expected a JSON object, found {}", json_kind(&value)),
            });
        };

        let timestamp_value = fields
            .get("timestamp")
            .ok_or(RecordError::MissingField { field: "timestamp" })?;
        let event_type = required_str(&fields, "event")?.to_string();
        let timestamp = parse_timestamp(timestamp_value)?;

        let resolved = self.messages.resolve(&event_type, &self.versions);
        if !resolved.specific {
            GenericSchemaUsed {
                event_type: &event_type,
                version: resolved.version,
            }
            .log();
        }

        let body = (resolved.constructor)(&fields).map_err(|e| RecordError::SchemaMismatch {
            event_type: event_type.clone(),
            version: resolved.version,
            reason: e.to_string(),
        })?;

        let event = Event::new(event_type, timestamp, resolved.version, line, fields, body);
        Ok(if self.keep_raw {
            event.with_raw(text.to_string())
        } else {
            event
        })
    }
}

fn required_str<'a>(
    fields: &'a serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, RecordError> {
    fields
        .get(field)
        .and_then(Value::as_str)
        .ok_or(RecordError::MissingField { field })
}

/// RFC 3339 instants, plus ISO-8601 instants without an offset, read as UTC.
fn parse_timestamp(value: &Value) -> Result<DateTime<Utc>, RecordError> {
    let Some(text) = value.as_str() else {
        return Err(RecordError::MalformedTimestamp {
            value: value.to_string(),
            reason: format!("expected a string, found {}", json_kind(value)),
        });
    };

    DateTime::parse_from_rfc3339(text)
        .map(|ts| ts.with_timezone(&Utc))
        .or_else(|e| {
            NaiveDateTime::parse_from_str(text, NAIVE_INSTANT)
                .map(|naive| naive.and_utc())
                .map_err(|_| e)
        })
        .map_err(|e| RecordError::MalformedTimestamp {
            value: text.to_string(),
            reason: e.to_string(),
        })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
