// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;     // watcher config + defaults
pub mod errors;     // error handling
pub mod events;     // typed events, registry, message resolver
pub mod observability;
pub mod parsing;    // header + record parsing
pub mod schema;     // schema versions + version resolver
pub mod source;     // journal sources + reader
pub mod watcher;    // poll loop + dispatch
