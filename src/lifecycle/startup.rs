//! Startup orchestration.
//!
//! # Responsibilities
//! - Register every configured application
//! - Apply configured extensions (before start, as any contributor would)
//! - Start all applications and assemble the dispatch engine
//!
//! # Design Decisions
//! - Subsystems initialize in order, not concurrently
//! - The registry is returned so embedders can add extensions of their own
//!   before starting

use std::sync::Arc;

use crate::app::{AppBuilder, AppRegistry, AppSet, RegistryError};
use crate::config::ServerPagesConfig;
use crate::http::{DispatchEngine, FileAssetServer, FileViewRenderer};

/// Registry with all configured applications and extensions, not started.
pub fn build_registry(config: &ServerPagesConfig) -> Result<AppRegistry, RegistryError> {
    let mut registry = AppRegistry::with_template_extensions(&config.views.template_extensions);
    for app in &config.apps {
        registry.register(AppBuilder::from_config(app))?;
    }
    for extension in &config.extensions {
        for asset in &extension.assets {
            registry.extend_assets(&extension.app, &asset.prefix, &asset.location)?;
        }
        for view in &extension.views {
            registry.extend_views(&extension.app, &view.prefix, &view.target)?;
        }
    }
    Ok(registry)
}

/// Register and start every configured application.
pub fn start(config: &ServerPagesConfig) -> Result<AppSet, RegistryError> {
    let mut registry = build_registry(config)?;
    let apps = registry.start_all()?;
    tracing::info!(apps = apps.len(), "Server pages applications started");
    Ok(apps)
}

/// Dispatch engine with the filesystem collaborators.
pub fn build_engine(config: &ServerPagesConfig, apps: AppSet) -> DispatchEngine {
    DispatchEngine::new(
        apps,
        Arc::new(FileAssetServer),
        Arc::new(FileViewRenderer::new(config.views.template_extensions.iter().cloned())),
    )
}
