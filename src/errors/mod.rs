// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod record;
mod source;
mod version;
mod watcher;

pub use config::ConfigError;
pub use record::RecordError;
pub use source::{SourceError, SourceResult};
pub use version::VersionError;
pub use watcher::WatcherError;
