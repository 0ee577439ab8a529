//! Application registry: registration, extensions, start and shutdown.
//!
//! # Responsibilities
//! - Reject duplicate application names and mount paths
//! - Collect extension locations per application name, even before the
//!   application itself is registered
//! - Freeze applications on start and refuse later extensions
//!
//! # Design Decisions
//! - `&mut self` on every mutation serializes extensions against the start
//!   transition; sharing the registry across threads needs an outer lock
//! - `shutdown` forgets everything so applications can be registered again

use std::collections::HashMap;
use std::sync::Arc;

use crate::app::application::{AppSet, Application};
use crate::app::builder::{normalize_extension, AppBuilder};
use crate::app::error::RegistryError;
use crate::locations::LocationRegistry;
use crate::routing::path::end_slash;

/// Locations added to an application by another party.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extension {
    pub assets: LocationRegistry,
    pub views: LocationRegistry,
}

/// Registration surface for all server pages applications.
#[derive(Debug, Default)]
pub struct AppRegistry {
    pending: Vec<AppBuilder>,
    started: Vec<Arc<Application>>,
    extensions: HashMap<String, Extension>,
    // None: renderer capabilities unknown, required extensions not checked
    template_extensions: Option<Vec<String>>,
}

impl AppRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry that checks required template extensions on start against
    /// what the view renderer handles.
    pub fn with_template_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            template_extensions: Some(
                extensions
                    .into_iter()
                    .map(|e| normalize_extension(e.as_ref()))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    /// Register an application (not started yet).
    pub fn register(&mut self, app: AppBuilder) -> Result<(), RegistryError> {
        let registered = self
            .pending
            .iter()
            .map(|p| (p.name(), p.mount(), p.root_view_target()))
            .chain(
                self.started
                    .iter()
                    .map(|s| (s.name(), s.mount(), s.root_view_target())),
            );
        for (name, mount, target) in registered {
            let detail = if name == app.name() {
                "name already registered".to_string()
            } else if mount == app.mount() {
                format!("mount path {} already used by '{}'", mount, name)
            } else if target == app.root_view_target() {
                format!("root view target '{}' already used by '{}'", target, name)
            } else {
                continue;
            };
            return Err(RegistryError::DuplicateRegistration {
                app: app.name().to_string(),
                detail,
            });
        }
        tracing::debug!(app = %app.name(), mount = %app.mount(), "Server pages application registered");
        self.pending.push(app);
        Ok(())
    }

    /// Add an asset location to an application that has not started yet.
    pub fn extend_assets(&mut self, app: &str, prefix: &str, location: &str) -> Result<(), RegistryError> {
        self.extension_mut(app)?
            .assets
            .register(prefix, end_slash(location));
        Ok(())
    }

    /// Add a view (rest) mapping to an application that has not started yet.
    pub fn extend_views(&mut self, app: &str, prefix: &str, target: &str) -> Result<(), RegistryError> {
        self.extension_mut(app)?
            .views
            .register(prefix, target.trim_matches('/'));
        Ok(())
    }

    /// Merge a whole extension registry into an application's extensions.
    pub fn extend(&mut self, app: &str, extension: Extension) -> Result<(), RegistryError> {
        let target = self.extension_mut(app)?;
        target.assets.merge(extension.assets);
        target.views.merge(extension.views);
        Ok(())
    }

    fn extension_mut(&mut self, app: &str) -> Result<&mut Extension, RegistryError> {
        if self.is_started(app) {
            return Err(RegistryError::AlreadyStarted {
                app: app.to_string(),
            });
        }
        Ok(self.extensions.entry(app.to_string()).or_default())
    }

    pub fn is_started(&self, app: &str) -> bool {
        self.started.iter().any(|s| s.name() == app)
    }

    /// Start one application: merge its extensions and freeze it.
    pub fn start(&mut self, app: &str) -> Result<Arc<Application>, RegistryError> {
        if self.is_started(app) {
            return Err(RegistryError::AlreadyStarted {
                app: app.to_string(),
            });
        }
        let position = self
            .pending
            .iter()
            .position(|p| p.name() == app)
            .ok_or_else(|| RegistryError::UnknownApp {
                app: app.to_string(),
            })?;
        if let Some(supported) = &self.template_extensions {
            if let Some(missing) = self.pending[position]
                .required_extensions()
                .iter()
                .find(|e| !supported.contains(e))
            {
                return Err(RegistryError::MissingTemplateSupport {
                    app: app.to_string(),
                    extension: missing.clone(),
                });
            }
        }
        let builder = self.pending.remove(position);
        let extension = self.extensions.remove(app);
        let application = Arc::new(builder.build(extension)?);
        // an extension may have remapped the root view
        if let Some(other) = self
            .started
            .iter()
            .find(|s| s.root_view_target() == application.root_view_target())
        {
            return Err(RegistryError::DuplicateRegistration {
                app: app.to_string(),
                detail: format!(
                    "root view target '{}' already used by '{}'",
                    application.root_view_target(),
                    other.name()
                ),
            });
        }
        tracing::debug!(app = %application.name(), "Server pages application started");
        self.started.push(Arc::clone(&application));
        Ok(application)
    }

    /// Start every registered application, in registration order.
    ///
    /// Extensions left for applications that were never registered are an
    /// error.
    pub fn start_all(&mut self) -> Result<AppSet, RegistryError> {
        let names: Vec<String> = self.pending.iter().map(|p| p.name().to_string()).collect();
        for name in names {
            self.start(&name)?;
        }
        if let Some(app) = self.extensions.keys().min() {
            return Err(RegistryError::UnknownApp { app: app.clone() });
        }
        Ok(self.started())
    }

    /// Snapshot of started applications.
    pub fn started(&self) -> AppSet {
        AppSet::new(self.started.clone())
    }

    pub fn application(&self, app: &str) -> Option<&Arc<Application>> {
        self.started.iter().find(|s| s.name() == app)
    }

    /// Drop all applications and extensions (full shutdown).
    pub fn shutdown(&mut self) {
        tracing::debug!(apps = self.started.len(), "Server pages registry shut down");
        self.pending.clear();
        self.started.clear();
        self.extensions.clear();
    }
}
