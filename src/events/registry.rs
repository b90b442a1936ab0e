// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::events::catalog::{self, Constructor};
use crate::schema::{SchemaVersion, BASELINE_V2_2_00, BASELINE_V2_2_02};
use std::collections::{BTreeMap, HashMap};

/// Event type name -> schema version -> typed constructor.
///
/// Built once at startup and shared read-only (usually as `Arc<EventTypeRegistry>`).
/// Every registered event type has at least one version entry.
#[derive(Clone, Default)]
pub struct EventTypeRegistry {
    entries: HashMap<String, BTreeMap<SchemaVersion, Constructor>>,
}

impl EventTypeRegistry {
    /// An empty registry: every event parses as generic.
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog shipped with this crate.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry
            .register("Fileheader", BASELINE_V2_2_00, catalog::fileheader)
            .register("LoadGame", BASELINE_V2_2_00, catalog::load_game)
            .register("Location", BASELINE_V2_2_00, catalog::location)
            .register("Docked", BASELINE_V2_2_00, catalog::docked_v2_2_00)
            .register("Docked", BASELINE_V2_2_02, catalog::docked_v2_2_02)
            .register("Undocked", BASELINE_V2_2_00, catalog::undocked)
            .register("FSDJump", BASELINE_V2_2_00, catalog::fsd_jump_v2_2_00)
            .register("FSDJump", BASELINE_V2_2_02, catalog::fsd_jump_v2_2_02)
            .register("Shutdown", BASELINE_V2_2_00, catalog::shutdown);
        registry
    }

    /// Adds (or replaces) the constructor for `event_type` at `version`.
    pub fn register(
        &mut self,
        event_type: &str,
        version: SchemaVersion,
        constructor: Constructor,
    ) -> &mut Self {
        self.entries
            .entry(event_type.to_string())
            .or_default()
            .insert(version, constructor);
        self
    }

    pub fn versions_of(&self, event_type: &str) -> Option<&BTreeMap<SchemaVersion, Constructor>> {
        self.entries.get(event_type)
    }

    pub fn contains(&self, event_type: &str) -> bool {
        self.entries.contains_key(event_type)
    }

    pub fn event_types(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for EventTypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.entries.keys().collect();
        names.sort();
        f.debug_struct("EventTypeRegistry")
            .field("event_type_count", &self.entries.len())
            .field("event_types", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let registry = EventTypeRegistry::builtin();
        assert!(registry.contains("Docked"));
        assert!(!registry.contains("UnknownFutureEvent"));

        let docked = registry.versions_of("Docked").unwrap();
        assert_eq!(
            docked.keys().copied().collect::<Vec<_>>(),
            vec![BASELINE_V2_2_00, BASELINE_V2_2_02]
        );

        for name in registry.event_types() {
            assert!(!registry.versions_of(name).unwrap().is_empty(), "{} has no versions", name);
        }
    }

    #[test]
    fn test_register_replaces_same_version() {
        let mut registry = EventTypeRegistry::new();
        assert!(registry.is_empty());
        registry
            .register("Docked", BASELINE_V2_2_00, catalog::generic)
            .register("Docked", BASELINE_V2_2_00, catalog::docked_v2_2_00);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.versions_of("Docked").unwrap().len(), 1);
    }
}
