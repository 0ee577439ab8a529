//! Started (immutable) application and the runtime application set.

use std::sync::Arc;

use regex::Regex;

use crate::fallback::{ErrorPageResolver, ErrorPageTable, SpaSupport};
use crate::locations::{ResolvedPrefixTable, ResourceResolver};
use crate::routing::path::end_slash;
use crate::routing::RequestClassifier;

/// A started server pages application. Read-only for the rest of the process.
#[derive(Debug)]
pub struct Application {
    pub(crate) name: String,
    pub(crate) mount: String,
    pub(crate) main_location: String,
    pub(crate) index: String,
    pub(crate) file_pattern: Regex,
    pub(crate) spa: SpaSupport,
    pub(crate) error_pages: ErrorPageTable,
    pub(crate) assets: ResolvedPrefixTable,
    pub(crate) views: ResolvedPrefixTable,
}

impl Application {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mount path in `/name/` form.
    pub fn mount(&self) -> &str {
        &self.mount
    }

    pub fn main_location(&self) -> &str {
        &self.main_location
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn file_pattern(&self) -> &Regex {
        &self.file_pattern
    }

    pub fn spa(&self) -> &SpaSupport {
        &self.spa
    }

    pub fn error_pages(&self) -> &ErrorPageTable {
        &self.error_pages
    }

    pub fn assets(&self) -> &ResolvedPrefixTable {
        &self.assets
    }

    pub fn views(&self) -> &ResolvedPrefixTable {
        &self.views
    }

    /// Rest prefix handling the application root.
    pub fn root_view_target(&self) -> &str {
        self.views
            .entries()
            .iter()
            .find(|entry| entry.prefix.is_empty())
            .and_then(|entry| entry.locations.first())
            .map_or(self.name.as_str(), String::as_str)
    }

    pub fn classifier(&self) -> RequestClassifier<'_> {
        RequestClassifier::new(&self.mount, &self.index, &self.file_pattern)
    }

    pub fn error_resolver(&self) -> ErrorPageResolver<'_> {
        ErrorPageResolver::new(&self.error_pages, &self.spa)
    }

    /// Backing file for an asset path relative to the mount.
    pub fn resolve_asset(&self, resolver: &ResourceResolver, path: &str) -> Option<String> {
        resolver.resolve(path, &self.assets)
    }

    /// Internal rest route for a logical page: `/{rest prefix}/{page}`.
    pub fn view_route(&self, page: &str) -> String {
        match self.views.first_match(page) {
            Some((entry, rest)) => {
                let target = entry.locations.first().map_or(self.name.as_str(), String::as_str);
                format!("/{}/{}", target, rest)
            }
            None => format!("/{}/{}", self.name, page),
        }
    }
}

/// Started applications, looked up by mount path (longest mount first).
#[derive(Debug, Clone, Default)]
pub struct AppSet {
    apps: Vec<Arc<Application>>,
}

impl AppSet {
    pub fn new(mut apps: Vec<Arc<Application>>) -> Self {
        apps.sort_by(|a, b| b.mount.len().cmp(&a.mount.len()));
        Self { apps }
    }

    /// Application owning the request path.
    pub fn find(&self, path: &str) -> Option<&Arc<Application>> {
        let path = end_slash(path);
        self.apps.iter().find(|app| path.starts_with(app.mount()))
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Application>> {
        self.apps.iter().find(|app| app.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Application>> {
        self.apps.iter()
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppBuilder;

    fn app(name: &str, mount: &str) -> Arc<Application> {
        Arc::new(AppBuilder::new(name, mount, "web").build(None).unwrap())
    }

    #[test]
    fn test_find_prefers_longest_mount() {
        let apps = AppSet::new(vec![app("root", "/"), app("admin", "/admin"), app("docs", "/admin/docs")]);
        assert_eq!(apps.find("/admin/docs/intro").unwrap().name(), "docs");
        assert_eq!(apps.find("/admin/users").unwrap().name(), "admin");
        assert_eq!(apps.find("/admin").unwrap().name(), "admin");
        assert_eq!(apps.find("/administrator").unwrap().name(), "root");
        assert_eq!(apps.find("/").unwrap().name(), "root");
    }

    #[test]
    fn test_find_none_without_root_app() {
        let apps = AppSet::new(vec![app("admin", "/admin")]);
        assert!(apps.find("/other").is_none());
    }

    #[test]
    fn test_view_route() {
        let app = Arc::new(
            AppBuilder::new("shop", "/shop", "web")
                .views("/admin", "shop-admin")
                .build(None)
                .unwrap(),
        );
        assert_eq!(app.view_route("users/42"), "/shop/users/42");
        assert_eq!(app.view_route("admin/users"), "/shop-admin/users");
    }
}
