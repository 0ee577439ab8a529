//! Mutable prefix → locations multi-map used while an application is assembled.
//!
//! # Responsibilities
//! - Keep registration order per prefix and across prefixes
//! - Merge extension registrations into the application's own registrations
//! - Produce the frozen lookup table
//!
//! # Design Decisions
//! - Registering the same (prefix, location) pair twice keeps the first one
//! - Precedence is decided only at `freeze`: newest location first within a
//!   prefix, longest prefix first across prefixes

use crate::locations::table::{PrefixEntry, ResolvedPrefixTable};
use crate::routing::path::normalize_prefix;

/// Ordered multi-map of registration prefix to backing locations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationRegistry {
    entries: Vec<(String, Vec<String>)>,
}

impl LocationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a location under a prefix.
    ///
    /// The prefix is normalized (`/foo` and `foo/` are the same key, `""` and
    /// `/` are the root key).
    pub fn register(&mut self, prefix: &str, location: impl Into<String>) -> &mut Self {
        let key = normalize_prefix(prefix);
        let location = location.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, locations)) => {
                if !locations.contains(&location) {
                    locations.push(location);
                }
            }
            None => self.entries.push((key, vec![location])),
        }
        self
    }

    /// Append all registrations of `other` after this registry's own.
    ///
    /// Merged locations count as registered later, so they win lookups for a
    /// shared prefix once the registry is frozen.
    pub fn merge(&mut self, other: LocationRegistry) -> &mut Self {
        for (key, locations) in other.entries {
            for location in locations {
                self.register(&key, location);
            }
        }
        self
    }

    /// True when at least one location is registered under the prefix.
    pub fn contains_prefix(&self, prefix: &str) -> bool {
        let key = normalize_prefix(prefix);
        self.entries.iter().any(|(k, _)| *k == key)
    }

    /// Locations registered under a prefix, in registration order.
    pub fn locations(&self, prefix: &str) -> &[String] {
        let key = normalize_prefix(prefix);
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, locations)| locations.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freeze into an immutable lookup table.
    pub fn freeze(self) -> ResolvedPrefixTable {
        let mut entries: Vec<PrefixEntry> = self
            .entries
            .into_iter()
            .map(|(prefix, mut locations)| {
                // newest registration is tried first
                locations.reverse();
                PrefixEntry { prefix, locations }
            })
            .collect();
        // stable: equal lengths keep registration order
        entries.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        ResolvedPrefixTable::new(entries)
    }
}
