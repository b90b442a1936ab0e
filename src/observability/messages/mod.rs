// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable text and
//! [`StructuredLog`] to emit it through `tracing` at its designated level with
//! structured fields attached.
//!
//! # Organization
//!
//! * `watcher` - poll loop lifecycle, replay and fatal source failures
//! * `queue` - dispatch queue lifecycle and callback faults
//! * `parsing` - header/version negotiation and per-line parse failures

use std::fmt::Display;
use tracing::Span;

pub mod parsing;
pub mod queue;
pub mod watcher;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog: Display {
    /// Emit the message at its designated level.
    fn log(&self);

    /// A span carrying the same fields, for work done on behalf of this message.
    fn span(&self, _name: &str) -> Span {
        Span::none()
    }
}
