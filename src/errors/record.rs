// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Per-record parse failures.
//!
//! Every variant here is recoverable: the watcher logs the failure with the
//! source name and line number, skips the line, and keeps polling.

use crate::schema::SchemaVersion;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    /// The line's bytes are not UTF-8.
    #[error("Invalid UTF-8 in record: {reason}")]
    InvalidUtf8 { reason: String },

    /// Line is not valid JSON, or is valid JSON but not an object.
    #[error("Malformed record: {reason}")]
    MalformedRecord { reason: String },

    /// A required field (`timestamp` or `event`) is absent, or `event` is not a string.
    #[error("Missing required field '{field}'")]
    MissingField { field: &'static str },

    /// The `timestamp` field is not a string holding an ISO-8601 instant.
    #[error("Malformed timestamp '{value}': {reason}")]
    MalformedTimestamp { value: String, reason: String },

    /// The typed constructor for the resolved schema rejected the fields.
    #[error("Record '{event_type}' does not match schema {version}: {reason}")]
    SchemaMismatch {
        event_type: String,
        version: SchemaVersion,
        reason: String,
    },
}
