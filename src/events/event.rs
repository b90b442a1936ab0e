// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::events::catalog::EventBody;
use crate::schema::SchemaVersion;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// One parsed journal record.
///
/// Immutable once built by the [`RecordParser`](crate::parsing::RecordParser).
/// Shared between queues as `Arc<Event>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    event_type: String,
    timestamp: DateTime<Utc>,
    schema_version: SchemaVersion,
    line: u64,
    data: Map<String, Value>,
    #[serde(skip_serializing_if = "EventBody::is_generic")]
    body: EventBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw: Option<String>,
}

impl Event {
    pub(crate) fn new(
        event_type: String,
        timestamp: DateTime<Utc>,
        schema_version: SchemaVersion,
        line: u64,
        data: Map<String, Value>,
        body: EventBody,
    ) -> Self {
        Self {
            event_type,
            timestamp,
            schema_version,
            line,
            data,
            body,
            raw: None,
        }
    }

    pub(crate) fn with_raw(mut self, raw: String) -> Self {
        self.raw = Some(raw);
        self
    }

    /// Value of the record's `event` field.
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Schema version whose constructor built [`body`](Self::body).
    pub fn schema_version(&self) -> SchemaVersion {
        self.schema_version
    }

    /// 1-based line number within the source.
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Every field of the original record, untouched.
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn body(&self) -> &EventBody {
        &self.body
    }

    /// Original line text, present only when the parser keeps raw data.
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Re-serializes the original field set.
    pub fn to_json(&self) -> Value {
        Value::Object(self.data.clone())
    }
}
