// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{
    DEFAULT_JOURNAL_DIRECTORY, DEFAULT_POLL_INTERVAL_MS, DEFAULT_THREAD_NAME_PREFIX,
};
use crate::errors::ConfigError;
use crate::schema::{SchemaVersion, VersionResolver};
use crate::watcher::WatchOptions;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Runtime configuration for a journal watcher.
///
/// Every field is optional; an empty document yields the defaults.
///
/// # Fields
/// * `poll_interval_ms` - Time between size checks; `0` polls without waiting
/// * `from_start` - Replay existing lines on start instead of tailing new ones
/// * `keep_raw` - Keep each line's raw text on its event
/// * `thread_name_prefix` - Prefix for the poll loop and queue thread names
/// * `journal_directory` - Where to look for the active journal (`~` is expanded)
/// * `build_overrides` - Extra client build -> schema version mappings, by release
///
/// # Example
/// ```yaml
/// poll_interval_ms: 250
/// from_start: false
/// journal_directory: ~/journals
/// build_overrides:
///   "2.2":
///     "127000": "2.2.03"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WatcherConfig {
    pub poll_interval_ms: u64,
    pub from_start: bool,
    pub keep_raw: bool,
    pub thread_name_prefix: String,
    pub journal_directory: Option<PathBuf>,
    pub build_overrides: BTreeMap<String, BTreeMap<String, SchemaVersion>>,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            from_start: true,
            keep_raw: false,
            thread_name_prefix: DEFAULT_THREAD_NAME_PREFIX.to_string(),
            journal_directory: None,
            build_overrides: BTreeMap::new(),
        }
    }
}

impl WatcherConfig {
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn watch_options(&self) -> WatchOptions {
        WatchOptions {
            from_start: self.from_start,
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            keep_raw: self.keep_raw,
            thread_name_prefix: self.thread_name_prefix.clone(),
        }
    }

    /// The built-in version table extended with `build_overrides`.
    ///
    /// Build keys may be written bare (`127000`) or as in a header (`r127000`).
    pub fn version_resolver(&self) -> Result<VersionResolver, ConfigError> {
        let mut resolver = VersionResolver::default();
        for (release, builds) in &self.build_overrides {
            for (build, version) in builds {
                let trimmed = build.trim();
                let client = trimmed
                    .strip_prefix('r')
                    .unwrap_or(trimmed)
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidBuild {
                        release: release.clone(),
                        build: build.clone(),
                    })?;
                resolver = resolver.with_build_mapping(release, client, *version);
            }
        }
        Ok(resolver)
    }

    /// The configured journal directory, or the platform default.
    pub fn journal_directory(&self) -> Option<PathBuf> {
        match &self.journal_directory {
            Some(dir) => Some(expand_home(dir)),
            None => default_journal_directory(),
        }
    }
}

/// Load a config file; `.toml` files are read as TOML, anything else as YAML.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<WatcherConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if is_toml {
        WatcherConfig::from_toml(&content)
    } else {
        WatcherConfig::from_yaml(&content)
    }
}

/// Replaces a leading `~` with the user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

/// `~/Saved Games/Frontier Developments/Elite Dangerous`, if a home directory is known.
pub fn default_journal_directory() -> Option<PathBuf> {
    let mut dir = dirs::home_dir()?;
    dir.extend(DEFAULT_JOURNAL_DIRECTORY);
    Some(dir)
}
