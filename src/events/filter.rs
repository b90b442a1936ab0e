// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeSet;

/// Which event types a subscriber wants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EventFilter {
    #[default]
    All,
    Types(BTreeSet<String>),
}

impl EventFilter {
    pub fn all() -> Self {
        Self::All
    }

    /// Filter on a set of event type names. An empty set matches everything.
    pub fn types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Types(types.into_iter().map(Into::into).collect())
    }

    pub fn matches(&self, event_type: &str) -> bool {
        match self {
            Self::All => true,
            Self::Types(types) => types.is_empty() || types.contains(event_type),
        }
    }
}

impl From<Option<Vec<String>>> for EventFilter {
    fn from(types: Option<Vec<String>>) -> Self {
        match types {
            None => Self::All,
            Some(types) => Self::types(types),
        }
    }
}
