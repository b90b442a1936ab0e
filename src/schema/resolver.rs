// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Game version normalization and compatible-schema selection.
//!
//! The journal header reports a coarse `gameversion` (`"2.2"`) and a build string
//! (`"r126898/r0"`). Point releases are only distinguishable by client build
//! number, so the resolver maps known builds to a canonical [`SchemaVersion`]
//! first and only falls back to parsing the reported string.
//!
//! Schemas evolve additively. A parser tries the newest baseline the client is
//! compatible with first and falls back towards the oldest baseline, which is
//! always present in a [`CompatibleVersionSet`].

use crate::errors::VersionError;
use crate::schema::SchemaVersion;
use std::collections::BTreeMap;

/// First published journal schema.
pub const BASELINE_V2_2_00: SchemaVersion = SchemaVersion::new(2, 2, 0);
/// Second baseline; added fields to `Docked` and `FSDJump`.
pub const BASELINE_V2_2_02: SchemaVersion = SchemaVersion::new(2, 2, 2);

/// Ordered, non-empty list of schema versions a parser may use, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibleVersionSet(Vec<SchemaVersion>);

impl CompatibleVersionSet {
    /// Builds a set from arbitrary versions, sorting newest first and dropping duplicates.
    ///
    /// Returns `None` for an empty input.
    pub fn new(mut versions: Vec<SchemaVersion>) -> Option<Self> {
        if versions.is_empty() {
            return None;
        }
        versions.sort_unstable_by(|a, b| b.cmp(a));
        versions.dedup();
        Some(Self(versions))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SchemaVersion> {
        self.0.iter()
    }

    pub fn newest(&self) -> SchemaVersion {
        self.0[0]
    }

    pub fn oldest(&self) -> SchemaVersion {
        self.0[self.0.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[SchemaVersion] {
        &self.0
    }
}

/// Client build numbers parsed from a header `build` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildNumbers {
    pub client: u64,
    pub server: u64,
}

impl BuildNumbers {
    /// Parses `r<client>/r<server>`, tolerating surrounding whitespace.
    pub fn parse(build: &str) -> Option<Self> {
        let (client, server) = build.trim().split_once('/')?;
        Some(Self {
            client: parse_revision(client)?,
            server: parse_revision(server)?,
        })
    }
}

fn parse_revision(part: &str) -> Option<u64> {
    let digits = part.strip_prefix('r')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Immutable version-resolution table.
///
/// Built once (usually via [`Default`]) and shared by every parser created from it.
#[derive(Debug, Clone)]
pub struct VersionResolver {
    /// `major.minor` -> client build -> canonical version
    builds: BTreeMap<String, BTreeMap<u64, SchemaVersion>>,
    /// Known schema baselines, oldest first
    baselines: Vec<SchemaVersion>,
}

impl Default for VersionResolver {
    fn default() -> Self {
        let mut v2_2 = BTreeMap::new();
        v2_2.insert(124484, SchemaVersion::new(2, 2, 0));
        v2_2.insert(125374, SchemaVersion::new(2, 2, 1));
        v2_2.insert(126898, SchemaVersion::new(2, 2, 2));

        let mut builds = BTreeMap::new();
        builds.insert("2.2".to_string(), v2_2);

        Self {
            builds,
            baselines: vec![BASELINE_V2_2_00, BASELINE_V2_2_02],
        }
    }
}

impl VersionResolver {
    /// Adds (or replaces) a client build -> version mapping under `release`.
    pub fn with_build_mapping(mut self, release: &str, client_build: u64, version: SchemaVersion) -> Self {
        self.builds
            .entry(release.trim().to_string())
            .or_default()
            .insert(client_build, version);
        self
    }

    /// Registers an additional schema baseline.
    pub fn with_baseline(mut self, version: SchemaVersion) -> Self {
        if let Err(pos) = self.baselines.binary_search(&version) {
            self.baselines.insert(pos, version);
        }
        self
    }

    pub fn baselines(&self) -> &[SchemaVersion] {
        &self.baselines
    }

    /// The oldest baseline; the generic fallback schema is bound to it.
    pub fn oldest_baseline(&self) -> SchemaVersion {
        self.baselines[0]
    }

    /// Normalizes a reported version to a canonical one.
    ///
    /// A build string matching the build table wins over the reported string.
    pub fn resolve(&self, reported: &str, build: &str) -> Result<SchemaVersion, VersionError> {
        if let Some(mapped) = self.lookup_build(reported, build) {
            return Ok(mapped);
        }
        reported.parse()
    }

    fn lookup_build(&self, reported: &str, build: &str) -> Option<SchemaVersion> {
        let client = BuildNumbers::parse(build)?.client;
        let table = self.builds.get(reported.trim()).or_else(|| {
            let parsed: SchemaVersion = reported.parse().ok()?;
            self.builds.get(&parsed.release_key())
        })?;
        table.get(&client).copied()
    }

    /// All baselines at or below `canonical`, newest first.
    ///
    /// The oldest baseline is always included, even for versions that predate it.
    pub fn compatible_versions(&self, canonical: SchemaVersion) -> CompatibleVersionSet {
        let mut versions: Vec<SchemaVersion> = self
            .baselines
            .iter()
            .copied()
            .filter(|baseline| *baseline <= canonical)
            .collect();
        versions.push(self.oldest_baseline());
        versions.sort_unstable_by(|a, b| b.cmp(a));
        versions.dedup();
        CompatibleVersionSet(versions)
    }
}
