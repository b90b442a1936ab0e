// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::events::catalog::{self, Constructor};
use crate::events::EventTypeRegistry;
use crate::schema::{CompatibleVersionSet, SchemaVersion};
use std::sync::Arc;

/// The constructor chosen for one event type, and the schema it belongs to.
#[derive(Clone, Copy)]
pub struct ResolvedSchema {
    pub version: SchemaVersion,
    pub constructor: Constructor,
    /// `false` when resolution fell back to the generic body.
    pub specific: bool,
}

impl std::fmt::Debug for ResolvedSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedSchema")
            .field("version", &self.version)
            .field("specific", &self.specific)
            .finish()
    }
}

/// Picks the most specific schema available for an event type.
///
/// Never fails. New event types show up in the journal before the catalog
/// knows about them, so unknown names degrade to the generic body bound to
/// the oldest compatible baseline.
#[derive(Debug, Clone)]
pub struct MessageResolver {
    registry: Arc<EventTypeRegistry>,
}

impl MessageResolver {
    pub fn new(registry: Arc<EventTypeRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &EventTypeRegistry {
        &self.registry
    }

    /// Returns the first registered constructor in `versions` order (newest first).
    pub fn resolve(&self, event_type: &str, versions: &CompatibleVersionSet) -> ResolvedSchema {
        let fallback = ResolvedSchema {
            version: versions.oldest(),
            constructor: catalog::generic,
            specific: false,
        };

        let Some(known) = self.registry.versions_of(event_type) else {
            return fallback;
        };

        versions
            .iter()
            .find_map(|version| {
                known.get(version).map(|constructor| ResolvedSchema {
                    version: *version,
                    constructor: *constructor,
                    specific: true,
                })
            })
            .unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::catalog::EventBody;
    use crate::schema::{SchemaVersion, VersionResolver, BASELINE_V2_2_00, BASELINE_V2_2_02};
    use serde_json::{json, Map, Value};

    fn resolver() -> MessageResolver {
        MessageResolver::new(Arc::new(EventTypeRegistry::builtin()))
    }

    fn docked_fields() -> Map<String, Value> {
        match json!({
            "event": "Docked",
            "StationName": "Jameson Memorial",
            "StarSystem": "Shinrarta Dezhra",
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_newest_compatible_schema_wins() {
        let versions = VersionResolver::default().compatible_versions(BASELINE_V2_2_02);
        let resolved = resolver().resolve("Docked", &versions);
        assert_eq!(resolved.version, BASELINE_V2_2_02);
        assert!(resolved.specific);
        assert!(matches!(
            (resolved.constructor)(&docked_fields()).unwrap(),
            EventBody::DockedV2202(_)
        ));
    }

    #[test]
    fn test_falls_back_to_older_schema() {
        let versions = VersionResolver::default().compatible_versions(BASELINE_V2_2_02);
        let resolved = resolver().resolve("Undocked", &versions);
        assert_eq!(resolved.version, BASELINE_V2_2_00);
        assert!(resolved.specific);

        let old_client = VersionResolver::default().compatible_versions(SchemaVersion::new(2, 2, 1));
        let resolved = resolver().resolve("Docked", &old_client);
        assert_eq!(resolved.version, BASELINE_V2_2_00);
        assert!(matches!(
            (resolved.constructor)(&docked_fields()).unwrap(),
            EventBody::Docked(_)
        ));
    }

    #[test]
    fn test_unknown_event_type_is_generic() {
        let versions = VersionResolver::default().compatible_versions(BASELINE_V2_2_02);
        for name in ["UnknownFutureEvent", "", "docked"] {
            let resolved = resolver().resolve(name, &versions);
            assert!(!resolved.specific, "{}", name);
            assert_eq!(resolved.version, BASELINE_V2_2_00);
            assert!((resolved.constructor)(&Map::new()).unwrap().is_generic());
        }
    }

    #[test]
    fn test_known_type_without_compatible_entry_is_generic() {
        let mut registry = EventTypeRegistry::new();
        registry.register("Docked", SchemaVersion::new(9, 0, 0), catalog::docked_v2_2_00);
        let resolver = MessageResolver::new(Arc::new(registry));

        let versions = VersionResolver::default().compatible_versions(BASELINE_V2_2_02);
        let resolved = resolver.resolve("Docked", &versions);
        assert!(!resolved.specific);
        assert_eq!(resolved.version, BASELINE_V2_2_00);
    }
}
