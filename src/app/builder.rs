//! Application builder (registration phase).

use std::collections::BTreeMap;

use regex::Regex;

use crate::app::application::Application;
use crate::app::error::RegistryError;
use crate::app::registry::Extension;
use crate::config::schema::AppConfig;
use crate::fallback::{ErrorPageTable, SpaSupport};
use crate::locations::LocationRegistry;
use crate::routing::path::{end_slash, normalize_mount};

/// File request detection: a `name.ext` last segment, optionally followed by
/// a query string. The first group is the file name.
pub const DEFAULT_FILE_PATTERN: &str = r"(?:^|/)([^/]+\.(?:[a-zA-Z\d]+))(?:\?.+)?$";

/// Requests never treated as SPA routes (static resources).
pub const DEFAULT_SPA_EXCLUDE: &str = r"\.(html|css|js|png|jpg|jpeg|gif|ico|xml|rss|txt|eot|svg|ttf|woff|woff2|cur)(\?((r|v|rel|rev)=[\-\.\w]*)?)?$";

pub const DEFAULT_INDEX: &str = "index.html";

/// Mutable application description, frozen by `AppRegistry::start`.
#[derive(Debug, Clone)]
pub struct AppBuilder {
    name: String,
    mount: String,
    main_location: String,
    index: String,
    file_pattern: String,
    spa: bool,
    spa_exclude: String,
    error_pages: BTreeMap<u16, String>,
    default_error_page: Option<String>,
    assets: LocationRegistry,
    views: LocationRegistry,
    required_extensions: Vec<String>,
}

impl AppBuilder {
    /// New application mounted at `mount` serving assets from `main_location`.
    pub fn new(name: impl Into<String>, mount: &str, main_location: &str) -> Self {
        let main_location = end_slash(main_location);
        let mut assets = LocationRegistry::new();
        assets.register("", main_location.clone());
        Self {
            name: name.into(),
            mount: normalize_mount(mount),
            main_location,
            index: DEFAULT_INDEX.to_string(),
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
            spa: false,
            spa_exclude: DEFAULT_SPA_EXCLUDE.to_string(),
            error_pages: BTreeMap::new(),
            default_error_page: None,
            assets,
            views: LocationRegistry::new(),
            required_extensions: Vec::new(),
        }
    }

    /// Builder populated from the configuration file.
    pub fn from_config(config: &AppConfig) -> Self {
        let mut builder = Self::new(&config.name, &config.mount_path, &config.assets_location)
            .index_file(&config.index_file)
            .file_pattern(&config.file_pattern)
            .spa(config.spa)
            .spa_exclude(&config.spa_exclude);
        for asset in &config.assets {
            builder = builder.assets(&asset.prefix, &asset.location);
        }
        for view in &config.views {
            builder = builder.views(&view.prefix, &view.target);
        }
        for extension in &config.required_extensions {
            builder = builder.require_extension(extension);
        }
        for page in &config.error_pages {
            builder = match page.status {
                Some(status) => builder.error_page(status, &page.page),
                None => builder.default_error_page(&page.page),
            };
        }
        builder
    }

    pub fn index_file(mut self, index: &str) -> Self {
        self.index = index.trim_start_matches('/').to_string();
        self
    }

    pub fn file_pattern(mut self, pattern: &str) -> Self {
        self.file_pattern = pattern.to_string();
        self
    }

    pub fn spa(mut self, enabled: bool) -> Self {
        self.spa = enabled;
        self
    }

    pub fn spa_exclude(mut self, pattern: &str) -> Self {
        self.spa_exclude = pattern.to_string();
        self
    }

    /// Error page for an exact status code.
    pub fn error_page(mut self, status: u16, page: &str) -> Self {
        self.error_pages.insert(status, page.to_string());
        self
    }

    /// Error page for any error status without an exact mapping.
    pub fn default_error_page(mut self, page: &str) -> Self {
        self.default_error_page = Some(page.to_string());
        self
    }

    /// Additional asset location under a URL prefix.
    pub fn assets(mut self, prefix: &str, location: &str) -> Self {
        self.assets.register(prefix, end_slash(location));
        self
    }

    /// View (rest) mapping for a URL prefix.
    pub fn views(mut self, prefix: &str, target: &str) -> Self {
        self.views.register(prefix, target.trim_matches('/'));
        self
    }

    /// Fail start when no view renderer handles this template extension.
    pub fn require_extension(mut self, extension: &str) -> Self {
        let extension = normalize_extension(extension);
        if !self.required_extensions.contains(&extension) {
            self.required_extensions.push(extension);
        }
        self
    }

    pub fn required_extensions(&self) -> &[String] {
        &self.required_extensions
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mount(&self) -> &str {
        &self.mount
    }

    /// Rest prefix handling the application root (latest mapping, else the
    /// application name).
    pub fn root_view_target(&self) -> &str {
        self.views
            .locations("")
            .last()
            .map_or(self.name.as_str(), String::as_str)
    }

    /// Merge extensions and freeze into a runtime application.
    pub(crate) fn build(mut self, extension: Option<Extension>) -> Result<Application, RegistryError> {
        if let Some(extension) = extension {
            self.assets.merge(extension.assets);
            self.views.merge(extension.views);
        }
        // application name is the default rest prefix
        if !self.views.contains_prefix("") {
            self.views.register("", self.name.clone());
        }

        let file_pattern = compile(&self.name, "file request", &self.file_pattern)?;
        let no_redirect = compile(&self.name, "SPA exclusion", &self.spa_exclude)?;

        Ok(Application {
            spa: SpaSupport::new(self.spa, self.mount.clone(), no_redirect),
            error_pages: ErrorPageTable::new(self.error_pages, self.default_error_page),
            assets: self.assets.freeze(),
            views: self.views.freeze(),
            name: self.name,
            mount: self.mount,
            main_location: self.main_location,
            index: self.index,
            file_pattern,
        })
    }
}

/// `.FTL` and `ftl` name the same extension.
pub fn normalize_extension(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_lowercase()
}

fn compile(app: &str, what: &'static str, pattern: &str) -> Result<Regex, RegistryError> {
    Regex::new(pattern).map_err(|source| RegistryError::InvalidPattern {
        app: app.to_string(),
        what,
        pattern: pattern.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let app = AppBuilder::new("shop", "shop", "web/shop").build(None).unwrap();
        assert_eq!(app.mount(), "/shop/");
        assert_eq!(app.index(), DEFAULT_INDEX);
        assert_eq!(app.assets().entries()[0].locations, ["web/shop/"]);
        // name used as root rest mapping
        assert_eq!(app.views().entries()[0].prefix, "");
        assert_eq!(app.views().entries()[0].locations, ["shop"]);
        assert!(!app.spa().is_enabled());
    }

    #[test]
    fn test_explicit_root_view_mapping_kept() {
        let app = AppBuilder::new("shop", "/shop", "web/shop")
            .views("/", "/other/")
            .build(None)
            .unwrap();
        assert_eq!(app.views().entries().len(), 1);
        assert_eq!(app.views().entries()[0].locations, ["other"]);
    }

    #[test]
    fn test_extension_merged_before_freeze() {
        let mut extension = Extension::default();
        extension.assets.register("", "ext/");
        extension.views.register("/admin", "admin");

        let app = AppBuilder::new("shop", "/shop", "web/shop")
            .build(Some(extension))
            .unwrap();
        assert_eq!(app.assets().entries()[0].locations, ["ext/", "web/shop/"]);
        assert_eq!(app.views().entries()[0].prefix, "admin/");
    }

    #[test]
    fn test_invalid_pattern_fails() {
        let err = AppBuilder::new("shop", "/shop", "web")
            .file_pattern("([unclosed")
            .build(None)
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidPattern { ref app, .. } if app == "shop"));
    }
}
