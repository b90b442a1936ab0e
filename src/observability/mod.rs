// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for all diagnostic and operational
//! logging in the watcher. Message types follow a struct-based pattern with a
//! `Display` implementation so that:
//!
//! * No log strings are scattered through the watcher and parser code
//! * Every log line carries the same structured fields for the same situation
//! * Output stays consistent between the poll loop, queue workers and replay
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::watcher` - poll loop lifecycle, replay and fatal source failures
//! * `messages::queue` - dispatch queue lifecycle and callback faults
//! * `messages::parsing` - header/version negotiation and per-line parse failures
//!
//! # Usage
//!
//! ```rust
//! use journal_watch::observability::messages::{parsing::LineParseFailed, StructuredLog};
//!
//! let error = std::io::Error::new(std::io::ErrorKind::InvalidData, "truncated");
//! LineParseFailed {
//!     source: "Journal.170101000000.01.log",
//!     line: 12,
//!     error: &error,
//! }
//! .log();
//! ```
//!
//! The library never installs a subscriber; the binary sets up
//! `tracing-subscriber` with an `EnvFilter`.

pub mod messages;
