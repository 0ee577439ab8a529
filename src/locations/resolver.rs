//! Resource lookup across overlaid locations.
//!
//! # Responsibilities
//! - Walk a frozen table in precedence order and return the first backing
//!   location that actually contains the resource
//! - Report every searched location when nothing is found
//!
//! # Design Decisions
//! - Lookup is deterministic and side-effect free apart from existence probes
//! - Paths walking upwards (`..`) never resolve

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::locations::table::ResolvedPrefixTable;
use crate::routing::path::{has_parent_segment, join, trim_leading_slash};

/// Lookup failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Template '{path}' not found in locations: {searched:?}")]
    NotFound { path: String, searched: Vec<String> },
}

/// Existence check for a concrete backing location.
pub trait ResourceProbe: Send + Sync {
    fn exists(&self, location: &str) -> bool;
}

/// Probe backed by the local filesystem (regular files only).
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl ResourceProbe for FsProbe {
    fn exists(&self, location: &str) -> bool {
        Path::new(location).is_file()
    }
}

impl<F> ResourceProbe for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn exists(&self, location: &str) -> bool {
        self(location)
    }
}

/// Resolves logical paths against a `ResolvedPrefixTable`.
#[derive(Clone)]
pub struct ResourceResolver {
    probe: Arc<dyn ResourceProbe>,
}

impl std::fmt::Debug for ResourceResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceResolver").finish_non_exhaustive()
    }
}

impl Default for ResourceResolver {
    fn default() -> Self {
        Self::filesystem()
    }
}

impl ResourceResolver {
    pub fn new(probe: Arc<dyn ResourceProbe>) -> Self {
        Self { probe }
    }

    /// Resolver probing the local filesystem.
    pub fn filesystem() -> Self {
        Self::new(Arc::new(FsProbe))
    }

    /// First existing location for `path`, or `None`.
    pub fn resolve(&self, path: &str, table: &ResolvedPrefixTable) -> Option<String> {
        let path = trim_leading_slash(path);
        if has_parent_segment(path) {
            return None;
        }
        table.matching(path).find_map(|(entry, rest)| {
            entry
                .locations
                .iter()
                .map(|location| join(location, rest))
                .find(|candidate| self.probe.exists(candidate))
        })
    }

    /// Like `resolve`, but fails with the full searched-location set.
    pub fn resolve_or_fail(
        &self,
        path: &str,
        table: &ResolvedPrefixTable,
    ) -> Result<String, LookupError> {
        self.resolve(path, table).ok_or_else(|| {
            let err = LookupError::NotFound {
                path: path.to_string(),
                searched: table.all_locations(),
            };
            // usually ends up as a 404, so this is the only trace of the cause
            tracing::error!("{}", err);
            err
        })
    }
}
